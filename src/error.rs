//! Error Types
//!
//! Failures of the two core calculations. Both are deterministic input
//! errors: the same inputs always fail the same way.

use thiserror::Error;

use crate::layout::{Orientation, RoofAxis};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error(
        "invalid panel geometry: {length} m x {width} m does not give a positive area (got {} m²)",
        .length * .width
    )]
    InvalidGeometry { length: f64, width: f64 },

    #[error(
        "degenerate spacing in {orientation} layout along the {axis}: panel dimension plus spacing is {divisor} m, must be positive"
    )]
    DegenerateSpacing { orientation: Orientation, axis: RoofAxis, divisor: f64 },

    #[error("{orientation} layout panel count exceeds {} and cannot be represented", u64::MAX)]
    LayoutOverflow { orientation: Orientation },
}

pub type Result<T> = std::result::Result<T, CalcError>;

// ===================== TESTS =====================
