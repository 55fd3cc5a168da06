//! Calculation Request
//!
//! Bundles the flat set of inputs a caller collects and runs both core
//! components in sequence, threading the panel dimensions from the energy
//! estimator into the layout planner. The two components fail independently.

use serde::{Deserialize, Serialize};

use crate::energy::{self, EnergyInputs, EnergyOutputResult, PanelGeometry, ThermalInputs};
use crate::error::Result;
use crate::layout::{self, LayoutResult, RoofGeometry};

/// All inputs of one calculator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub thermal: ThermalInputs,
    pub use_ftemp: bool,
    pub panel: PanelGeometry,
    pub energy: EnergyInputs,
    pub roof: RoofGeometry,
}

impl Default for Calculation {
    fn default() -> Self {
        Self {
            thermal: ThermalInputs::default(),
            use_ftemp: true,
            panel: PanelGeometry::default(),
            energy: EnergyInputs::default(),
            roof: RoofGeometry::default(),
        }
    }
}

/// Outcome of both components; either section may hold an error
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationReport {
    pub energy: Result<EnergyOutputResult>,
    pub layout: Result<LayoutResult>,
}

impl CalculationReport {
    pub fn is_complete(&self) -> bool {
        self.energy.is_ok() && self.layout.is_ok()
    }
}

impl Calculation {
    pub fn run(&self) -> CalculationReport {
        let energy =
            energy::compute_energy_output(&self.thermal, self.use_ftemp, &self.panel, &self.energy);
        let layout = layout::compute_layout(&self.roof, &self.panel);
        CalculationReport { energy, layout }
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use crate::layout::Recommendation;

    #[test]
    fn test_default_run_is_complete() {
        let report = Calculation::default().run();
        assert!(report.is_complete());

        let energy = report.energy.unwrap();
        assert!((energy.ftemp - 0.965).abs() < 1e-9);
        assert!((energy.eout - 991.128_118_05).abs() < 1e-6);

        let layout = report.layout.unwrap();
        assert_eq!(layout.recommendation, Recommendation::Landscape);
        assert_eq!(layout.recommended_total(), 72);
    }

    #[test]
    fn test_layout_failure_does_not_block_energy() {
        let mut calc = Calculation::default();
        calc.roof.spacing = -1.1;
        let report = calc.run();

        assert!(!report.is_complete());
        assert!(report.energy.is_ok());
        assert!(matches!(report.layout, Err(CalcError::DegenerateSpacing { .. })));
    }

    #[test]
    fn test_zero_width_panel_fails_energy_only_when_spacing_is_positive() {
        let mut calc = Calculation::default();
        calc.panel.width = 0.0;
        let report = calc.run();

        assert!(matches!(report.energy, Err(CalcError::InvalidGeometry { .. })));
        // 0.0 + 0.1 spacing is still a positive divisor
        assert!(report.layout.is_ok());
    }
}
