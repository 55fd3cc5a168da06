//! PV Sizer
//!
//! Back-of-envelope photovoltaic sizing: a derating-factor estimate of the
//! energy a panel delivers per square meter, and a grid count of how many
//! panels fit on a roof in landscape versus portrait orientation.
//!
//! ```
//! use pv_sizer::{Calculation, Recommendation};
//!
//! let report = Calculation::default().run();
//! let layout = report.layout.unwrap();
//! assert_eq!(layout.recommendation, Recommendation::Landscape);
//! assert_eq!(layout.recommended_total(), 72);
//! ```

pub mod calculation;
pub mod config;
pub mod energy;
pub mod error;
pub mod factor;
pub mod layout;

pub use calculation::{Calculation, CalculationReport};
pub use energy::{
    EnergyInputs, EnergyOutputResult, PanelGeometry, ThermalInputs, compute_energy_output,
    temperature_factor,
};
pub use error::CalcError;
pub use factor::{CorrectionFactor, effective_value};
pub use layout::{
    LayoutResult, Orientation, OrientationFit, Recommendation, RoofGeometry, compute_layout,
};
