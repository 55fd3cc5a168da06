//! Switchable Factors
//!
//! Every optional term of the energy formula (the six correction factors,
//! PSH, PASTC and the temperature factor) can be switched off. A switched-off
//! term contributes the multiplicative identity, never its stored value.

use serde::{Deserialize, Serialize};

/// Value a term contributes to a product: `value` when enabled, otherwise 1.0.
#[inline]
pub fn effective_value(enabled: bool, value: f64) -> f64 {
    if enabled { value } else { 1.0 }
}

// ===================== DEFAULTS =====================

/// Manufacturing (mismatch) tolerance
pub const DEFAULT_FMM: f64 = 1.0;
/// Cleaning / soiling losses
pub const DEFAULT_FCLEAN: f64 = 0.98;
/// Long-term degradation
pub const DEFAULT_FDEGRAD: f64 = 0.98;
/// Shading losses
pub const DEFAULT_FSUNSHADE: f64 = 1.0;
/// DC/AC cable efficiency
pub const DEFAULT_ETA_CABLE: f64 = 0.98;
/// Inverter efficiency
pub const DEFAULT_ETA_INV: f64 = 0.97;

// ===================== CORRECTION FACTOR =====================

/// A named multiplicative derating factor with an on/off switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionFactor {
    pub name: String,
    pub enabled: bool,
    pub value: f64,
}

impl CorrectionFactor {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), enabled: true, value }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Contribution of this factor to the energy product.
    pub fn effective(&self) -> f64 {
        effective_value(self.enabled, self.value)
    }

    pub fn fmm() -> Self {
        Self::new("fmm", DEFAULT_FMM)
    }

    pub fn fclean() -> Self {
        Self::new("fclean", DEFAULT_FCLEAN)
    }

    pub fn fdegrad() -> Self {
        Self::new("fdegrad", DEFAULT_FDEGRAD)
    }

    pub fn fsunshade() -> Self {
        Self::new("fsunshade", DEFAULT_FSUNSHADE)
    }

    pub fn eta_cable() -> Self {
        Self::new("Cable Efficiency", DEFAULT_ETA_CABLE)
    }

    pub fn eta_inv() -> Self {
        Self::new("Inverter Efficiency", DEFAULT_ETA_INV)
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_value_switch() {
        assert_eq!(effective_value(true, 0.97), 0.97);
        assert_eq!(effective_value(false, 0.97), 1.0);
        // Disabled means identity even for nonsense stored values
        assert_eq!(effective_value(false, f64::NAN), 1.0);
        assert_eq!(effective_value(false, -3.0), 1.0);
    }

    #[test]
    fn test_disabled_factor_is_exactly_one() {
        let f = CorrectionFactor::eta_inv().enabled(false);
        assert_eq!(f.value, DEFAULT_ETA_INV);
        assert_eq!(f.effective(), 1.0);
    }

    #[test]
    fn test_builder_overrides_value() {
        let f = CorrectionFactor::fclean().with_value(0.95);
        assert!(f.enabled);
        assert_eq!(f.name, "fclean");
        assert_eq!(f.effective(), 0.95);
    }
}
