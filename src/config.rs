//! Configuration File
//!
//! Optional TOML file holding calculator inputs. Every key is optional; keys
//! that are present overwrite the built-in defaults and are in turn
//! overwritten by command-line flags.
//!
//! ```toml
//! [thermal]
//! use_ftemp = true
//! pcoef = -0.35
//! tavg = 35.0
//!
//! [panel]
//! length = 2.0
//! width = 1.1
//!
//! [energy]
//! psh = 4.5
//! pastc = 550.0
//!
//! [factors.fclean]
//! enabled = false
//!
//! [roof]
//! width = 10.0
//! length = 20.0
//! spacing = 0.1
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculation::Calculation;
use crate::factor::CorrectionFactor;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub thermal: ThermalSection,
    pub panel: PanelSection,
    pub energy: EnergySection,
    pub factors: FactorsSection,
    pub roof: RoofSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThermalSection {
    pub use_ftemp: Option<bool>,
    pub pcoef: Option<f64>,
    pub tavg: Option<f64>,
    pub tstc: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelSection {
    pub length: Option<f64>,
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnergySection {
    pub psh: Option<f64>,
    pub use_psh: Option<bool>,
    pub pastc: Option<f64>,
    pub use_pastc: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactorSetting {
    pub enabled: Option<bool>,
    pub value: Option<f64>,
}

impl FactorSetting {
    fn apply_to(&self, factor: &mut CorrectionFactor) {
        if let Some(enabled) = self.enabled {
            factor.enabled = enabled;
        }
        if let Some(value) = self.value {
            factor.value = value;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactorsSection {
    pub fmm: FactorSetting,
    pub fclean: FactorSetting,
    pub fdegrad: FactorSetting,
    pub fsunshade: FactorSetting,
    pub eta_cable: FactorSetting,
    pub eta_inv: FactorSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoofSection {
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub spacing: Option<f64>,
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl FileConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Overwrite the inputs of `calc` with every key present in the file.
    pub fn apply_to(&self, calc: &mut Calculation) {
        set(&mut calc.use_ftemp, self.thermal.use_ftemp);
        set(&mut calc.thermal.pcoef, self.thermal.pcoef);
        set(&mut calc.thermal.tavg, self.thermal.tavg);
        set(&mut calc.thermal.tstc, self.thermal.tstc);

        set(&mut calc.panel.length, self.panel.length);
        set(&mut calc.panel.width, self.panel.width);

        set(&mut calc.energy.psh, self.energy.psh);
        set(&mut calc.energy.use_psh, self.energy.use_psh);
        set(&mut calc.energy.pastc, self.energy.pastc);
        set(&mut calc.energy.use_pastc, self.energy.use_pastc);

        let f = &self.factors;
        f.fmm.apply_to(&mut calc.energy.fmm);
        f.fclean.apply_to(&mut calc.energy.fclean);
        f.fdegrad.apply_to(&mut calc.energy.fdegrad);
        f.fsunshade.apply_to(&mut calc.energy.fsunshade);
        f.eta_cable.apply_to(&mut calc.energy.eta_cable);
        f.eta_inv.apply_to(&mut calc.energy.eta_inv);

        set(&mut calc.roof.width, self.roof.width);
        set(&mut calc.roof.length, self.roof.length);
        set(&mut calc.roof.spacing, self.roof.spacing);
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_keeps_defaults() {
        let cfg = FileConfig::from_toml_str("").unwrap();
        let mut calc = Calculation::default();
        cfg.apply_to(&mut calc);
        assert_eq!(calc, Calculation::default());
    }

    #[test]
    fn test_partial_sections_override_only_given_keys() {
        let cfg = FileConfig::from_toml_str(
            r#"
            [thermal]
            use_ftemp = false
            tavg = 45.0

            [factors.fclean]
            enabled = false

            [factors.eta_inv]
            value = 0.96

            [roof]
            spacing = 0.02
            "#,
        )
        .unwrap();

        let mut calc = Calculation::default();
        cfg.apply_to(&mut calc);

        assert!(!calc.use_ftemp);
        assert_eq!(calc.thermal.tavg, 45.0);
        assert_eq!(calc.thermal.pcoef, -0.35);
        assert!(!calc.energy.fclean.enabled);
        assert_eq!(calc.energy.fclean.value, 0.98);
        assert!(calc.energy.eta_inv.enabled);
        assert_eq!(calc.energy.eta_inv.value, 0.96);
        assert_eq!(calc.roof.spacing, 0.02);
        assert_eq!(calc.roof.width, 10.0);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml_str("[panel]\nheight = 2.0\n").is_err());
        assert!(FileConfig::from_toml_str("[inverter]\nvalue = 0.9\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[panel]\nlength = 1.7\nwidth = 1.0").unwrap();

        let cfg = FileConfig::load(file.path()).unwrap();
        assert_eq!(cfg.panel.length, Some(1.7));
        assert_eq!(cfg.panel.width, Some(1.0));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = FileConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[roof]\nwidth = \"ten\"").unwrap();
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
