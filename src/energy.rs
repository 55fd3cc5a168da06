//! Energy Output Estimator
//!
//! Derating-factor model for the daily energy a PV panel delivers per square
//! meter of panel:
//!
//! ```text
//! Eout = PSH * PASTC * fmm * ftemp * fclean * fdegrad * fsunshade * eta_cable * eta_inv / area
//! ```
//!
//! where `ftemp = 1 + (Pcoef / 100) * (Tavg - Tstc)` is the linear temperature
//! derating of the panel relative to Standard Test Conditions.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CalcError, Result};
use crate::factor::{CorrectionFactor, effective_value};

// ===================== CONSTANTS =====================

/// Cell temperature at Standard Test Conditions (°C)
pub const STC_TEMPERATURE: f64 = 25.0;

/// Typical crystalline silicon power temperature coefficient (%/°C)
pub const DEFAULT_PCOEF: f64 = -0.35;

/// Default average operating temperature (°C)
pub const DEFAULT_TAVG: f64 = 35.0;

/// Default peak sun hours (h/day)
pub const DEFAULT_PSH: f64 = 4.5;

/// Default panel rating at STC (W)
pub const DEFAULT_PASTC: f64 = 550.0;

/// Default panel length (m)
pub const DEFAULT_PANEL_LENGTH: f64 = 2.0;

/// Default panel width (m)
pub const DEFAULT_PANEL_WIDTH: f64 = 1.1;

// ===================== INPUTS =====================

/// Thermal parameters for the temperature derating factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalInputs {
    /// Power temperature coefficient in %/°C (typically negative)
    pub pcoef: f64,
    /// Average operating temperature (°C)
    pub tavg: f64,
    /// Reference temperature (°C), 25 at STC
    pub tstc: f64,
}

impl ThermalInputs {
    pub fn new(pcoef: f64, tavg: f64) -> Self {
        Self { pcoef, tavg, tstc: STC_TEMPERATURE }
    }

    pub fn with_reference(mut self, tstc: f64) -> Self {
        self.tstc = tstc;
        self
    }
}

impl Default for ThermalInputs {
    fn default() -> Self {
        Self::new(DEFAULT_PCOEF, DEFAULT_TAVG)
    }
}

/// Physical panel dimensions in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    pub length: f64,
    pub width: f64,
}

impl PanelGeometry {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    /// Panel area (m²), checked to be strictly positive.
    pub fn area(&self) -> Result<f64> {
        let area = self.length * self.width;
        // `!(x > 0.0)` also rejects NaN
        if !(self.length > 0.0 && self.width > 0.0 && area > 0.0 && area.is_finite()) {
            return Err(CalcError::InvalidGeometry { length: self.length, width: self.width });
        }
        Ok(area)
    }

    /// Same panel rotated by 90 degrees
    pub fn rotated(&self) -> Self {
        Self { length: self.width, width: self.length }
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_PANEL_LENGTH, DEFAULT_PANEL_WIDTH)
    }
}

/// Irradiance, rating and correction factors entering the energy product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyInputs {
    /// Peak sun hours
    pub psh: f64,
    pub use_psh: bool,
    /// Panel power at STC (W)
    pub pastc: f64,
    pub use_pastc: bool,
    pub fmm: CorrectionFactor,
    pub fclean: CorrectionFactor,
    pub fdegrad: CorrectionFactor,
    pub fsunshade: CorrectionFactor,
    pub eta_cable: CorrectionFactor,
    pub eta_inv: CorrectionFactor,
}

impl EnergyInputs {
    pub fn new(psh: f64, pastc: f64) -> Self {
        Self {
            psh,
            use_psh: true,
            pastc,
            use_pastc: true,
            fmm: CorrectionFactor::fmm(),
            fclean: CorrectionFactor::fclean(),
            fdegrad: CorrectionFactor::fdegrad(),
            fsunshade: CorrectionFactor::fsunshade(),
            eta_cable: CorrectionFactor::eta_cable(),
            eta_inv: CorrectionFactor::eta_inv(),
        }
    }

    pub fn effective_psh(&self) -> f64 {
        effective_value(self.use_psh, self.psh)
    }

    pub fn effective_pastc(&self) -> f64 {
        effective_value(self.use_pastc, self.pastc)
    }

    /// The six correction factors in formula order
    pub fn factors(&self) -> [&CorrectionFactor; 6] {
        [&self.fmm, &self.fclean, &self.fdegrad, &self.fsunshade, &self.eta_cable, &self.eta_inv]
    }

    pub fn factors_mut(&mut self) -> [&mut CorrectionFactor; 6] {
        [
            &mut self.fmm,
            &mut self.fclean,
            &mut self.fdegrad,
            &mut self.fsunshade,
            &mut self.eta_cable,
            &mut self.eta_inv,
        ]
    }

    /// Product of the effective correction factors (1.0 when all are off)
    pub fn derate_product(&self) -> f64 {
        self.factors().iter().map(|f| f.effective()).product()
    }
}

impl Default for EnergyInputs {
    fn default() -> Self {
        Self::new(DEFAULT_PSH, DEFAULT_PASTC)
    }
}

// ===================== RESULT =====================

/// Estimator output. Values are kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyOutputResult {
    /// Temperature factor applied in the energy product
    pub ftemp: f64,
    /// Temperature factor from the linear model, reported even when bypassed
    pub ftemp_calculated: f64,
    /// Panel area (m²)
    pub area: f64,
    /// Estimated energy output (Wh/m²)
    pub eout: f64,
}

// ===================== MODEL =====================

/// Linear temperature derating factor.
///
/// # Arguments
/// * `thermal` - Temperature coefficient, average and reference temperature
///
/// # Returns
/// `1 + (pcoef / 100) * (tavg - tstc)`
pub fn temperature_factor(thermal: &ThermalInputs) -> f64 {
    1.0 + (thermal.pcoef / 100.0) * (thermal.tavg - thermal.tstc)
}

/// Estimate energy output per unit panel area.
///
/// # Arguments
/// * `thermal` - Inputs for the temperature factor
/// * `use_ftemp` - When false the temperature factor is forced to exactly 1.0
/// * `geometry` - Panel dimensions; area must be strictly positive
/// * `energy` - PSH, PASTC and correction factors with their switches
///
/// # Returns
/// ftemp, area and Eout, or `InvalidGeometry` for a non-positive panel area
pub fn compute_energy_output(
    thermal: &ThermalInputs,
    use_ftemp: bool,
    geometry: &PanelGeometry,
    energy: &EnergyInputs,
) -> Result<EnergyOutputResult> {
    let ftemp_calculated = temperature_factor(thermal);
    if ftemp_calculated <= 0.0 {
        warn!(
            ftemp = ftemp_calculated,
            "Temperature factor is not positive; Tavg {:.1}°C is outside the linear model's range",
            thermal.tavg
        );
    }
    let ftemp = effective_value(use_ftemp, ftemp_calculated);

    let area = geometry.area()?;

    let psh = energy.effective_psh();
    let pastc = energy.effective_pastc();
    let derate = energy.derate_product();

    let eout = psh * pastc * ftemp * derate / area;
    debug!(ftemp, area, psh, pastc, derate, eout, "Computed energy output");

    Ok(EnergyOutputResult { ftemp, ftemp_calculated, area, eout })
}

// ===================== TESTS =====================
