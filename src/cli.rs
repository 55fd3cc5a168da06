//! Command-Line Interface Module
//!
//! Handles argument parsing and validation for the pv-sizer application.
//! Numeric flags are optional: when absent the value comes from the config
//! file, or the built-in default.

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use pv_sizer::Calculation;
use pv_sizer::factor::CorrectionFactor;

// ===================== CLI =====================

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// TOML file with calculator inputs (flags override values from the file)
    #[arg(long, env = "PV_SIZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, env = "PV_SIZER_JSON")]
    pub json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Show build info from Cargo.lock at time of building
    #[arg(long)]
    pub show_build_info: bool,

    // ===================== TEMPERATURE =====================
    /// Power temperature coefficient in %/°C (typically negative, e.g. -0.35)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_pcoef, env = "PV_SIZER_PCOEF")]
    pub pcoef: Option<f64>,

    /// Average operating temperature in °C
    #[arg(long, allow_hyphen_values = true, value_parser = parse_temperature, env = "PV_SIZER_TAVG")]
    pub tavg: Option<f64>,

    /// Reference (STC) temperature in °C
    #[arg(long, allow_hyphen_values = true, value_parser = parse_temperature, env = "PV_SIZER_TSTC")]
    pub tstc: Option<f64>,

    /// Leave the temperature factor out of the energy estimate (ftemp = 1)
    #[arg(long, env = "PV_SIZER_NO_FTEMP")]
    pub no_ftemp: bool,

    // ===================== PANEL =====================
    /// Panel length in meters
    #[arg(long, value_parser = parse_positive_f64, env = "PV_SIZER_PANEL_LENGTH")]
    pub panel_length: Option<f64>,

    /// Panel width in meters
    #[arg(long, value_parser = parse_positive_f64, env = "PV_SIZER_PANEL_WIDTH")]
    pub panel_width: Option<f64>,

    // ===================== ENERGY =====================
    /// Peak sun hours (equivalent hours per day at 1000 W/m²)
    #[arg(long, value_parser = parse_positive_f64, env = "PV_SIZER_PSH")]
    pub psh: Option<f64>,

    /// Leave PSH out of the energy estimate
    #[arg(long, env = "PV_SIZER_NO_PSH")]
    pub no_psh: bool,

    /// Panel maximum power at STC in watts
    #[arg(long, value_parser = parse_positive_f64, env = "PV_SIZER_PASTC")]
    pub pastc: Option<f64>,

    /// Leave PASTC out of the energy estimate
    #[arg(long, env = "PV_SIZER_NO_PASTC")]
    pub no_pastc: bool,

    // ===================== CORRECTION FACTORS =====================
    /// Manufacturing tolerance factor
    #[arg(long, value_parser = parse_factor, env = "PV_SIZER_FMM")]
    pub fmm: Option<f64>,
    /// Leave the manufacturing tolerance factor out of the energy estimate
    #[arg(long, env = "PV_SIZER_NO_FMM")]
    pub no_fmm: bool,

    /// Cleaning / soiling factor
    #[arg(long, value_parser = parse_factor, env = "PV_SIZER_FCLEAN")]
    pub fclean: Option<f64>,
    /// Leave the cleaning factor out of the energy estimate
    #[arg(long, env = "PV_SIZER_NO_FCLEAN")]
    pub no_fclean: bool,

    /// Degradation factor
    #[arg(long, value_parser = parse_factor, env = "PV_SIZER_FDEGRAD")]
    pub fdegrad: Option<f64>,
    /// Leave the degradation factor out of the energy estimate
    #[arg(long, env = "PV_SIZER_NO_FDEGRAD")]
    pub no_fdegrad: bool,

    /// Shading factor
    #[arg(long, value_parser = parse_factor, env = "PV_SIZER_FSUNSHADE")]
    pub fsunshade: Option<f64>,
    /// Leave the shading factor out of the energy estimate
    #[arg(long, env = "PV_SIZER_NO_FSUNSHADE")]
    pub no_fsunshade: bool,

    /// Cable efficiency
    #[arg(long, value_parser = parse_factor, env = "PV_SIZER_ETA_CABLE")]
    pub eta_cable: Option<f64>,
    /// Leave cable efficiency out of the energy estimate
    #[arg(long, env = "PV_SIZER_NO_ETA_CABLE")]
    pub no_eta_cable: bool,

    /// Inverter efficiency
    #[arg(long, value_parser = parse_factor, env = "PV_SIZER_ETA_INV")]
    pub eta_inv: Option<f64>,
    /// Leave inverter efficiency out of the energy estimate
    #[arg(long, env = "PV_SIZER_NO_ETA_INV")]
    pub no_eta_inv: bool,

    // ===================== ROOF =====================
    /// Roof width in meters
    #[arg(long, value_parser = parse_positive_f64, env = "PV_SIZER_ROOF_WIDTH")]
    pub roof_width: Option<f64>,

    /// Roof length in meters
    #[arg(long, value_parser = parse_positive_f64, env = "PV_SIZER_ROOF_LENGTH")]
    pub roof_length: Option<f64>,

    /// Gap between adjacent panels in meters
    #[arg(long, value_parser = parse_non_negative_f64, env = "PV_SIZER_SPACING")]
    pub spacing: Option<f64>,
}

impl Args {
    /// Overwrite `calc` with every value given on the command line.
    pub fn apply_to(&self, calc: &mut Calculation) {
        fn set(target: &mut f64, value: Option<f64>) {
            if let Some(v) = value {
                *target = v;
            }
        }
        fn factor(f: &mut CorrectionFactor, value: Option<f64>, disable: bool) {
            set(&mut f.value, value);
            if disable {
                f.enabled = false;
            }
        }

        set(&mut calc.thermal.pcoef, self.pcoef);
        set(&mut calc.thermal.tavg, self.tavg);
        set(&mut calc.thermal.tstc, self.tstc);
        if self.no_ftemp {
            calc.use_ftemp = false;
        }

        set(&mut calc.panel.length, self.panel_length);
        set(&mut calc.panel.width, self.panel_width);

        set(&mut calc.energy.psh, self.psh);
        if self.no_psh {
            calc.energy.use_psh = false;
        }
        set(&mut calc.energy.pastc, self.pastc);
        if self.no_pastc {
            calc.energy.use_pastc = false;
        }

        let e = &mut calc.energy;
        factor(&mut e.fmm, self.fmm, self.no_fmm);
        factor(&mut e.fclean, self.fclean, self.no_fclean);
        factor(&mut e.fdegrad, self.fdegrad, self.no_fdegrad);
        factor(&mut e.fsunshade, self.fsunshade, self.no_fsunshade);
        factor(&mut e.eta_cable, self.eta_cable, self.no_eta_cable);
        factor(&mut e.eta_inv, self.eta_inv, self.no_eta_inv);

        set(&mut calc.roof.width, self.roof_width);
        set(&mut calc.roof.length, self.roof_length);
        set(&mut calc.roof.spacing, self.spacing);
    }
}

// Define the structure to match what we serialized in build.rs
#[derive(Debug, Deserialize)]
pub struct DepInfo {
    pub name: String,
    pub version: String,
    pub checksum: Option<String>,
    pub source: Option<String>,
}

// ===================== CLI VALUE PARSERS =====================

fn parse_finite(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !v.is_finite() {
        return Err(format!("Value must be finite, got {}", v));
    }
    Ok(v)
}

fn parse_pcoef(s: &str) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if !(-5.0..=5.0).contains(&v) {
        return Err(format!("Temperature coefficient must be between -5 and 5 %/°C, got {}", v));
    }
    Ok(v)
}

fn parse_temperature(s: &str) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if !(-90.0..=120.0).contains(&v) {
        return Err(format!("Temperature must be between -90 and 120 °C, got {}", v));
    }
    Ok(v)
}

fn parse_positive_f64(s: &str) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if v <= 0.0 {
        return Err(format!("Value must be positive, got {}", v));
    }
    Ok(v)
}

fn parse_non_negative_f64(s: &str) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if v < 0.0 {
        return Err(format!("Value must not be negative, got {}", v));
    }
    Ok(v)
}

fn parse_factor(s: &str) -> Result<f64, String> {
    let v = parse_finite(s)?;
    if !(0.0..=2.0).contains(&v) {
        return Err(format!("Correction factor must be between 0.0 and 2.0, got {}", v));
    }
    Ok(v)
}

// ===================== TESTS =====================
