//! Panel Layout Planner
//!
//! Counts how many whole panels fit on a rectangular roof when every panel is
//! laid out on a regular grid in a single orientation, and recommends the
//! orientation that fits more. Mixed orientations and offset rows are not
//! considered.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::energy::PanelGeometry;
use crate::error::{CalcError, Result};

// ===================== CONSTANTS =====================

/// Default roof width (m)
pub const DEFAULT_ROOF_WIDTH: f64 = 10.0;

/// Default roof length (m)
pub const DEFAULT_ROOF_LENGTH: f64 = 20.0;

/// Default gap between adjacent panels (m)
pub const DEFAULT_SPACING: f64 = 0.1;

// ===================== TYPES =====================

/// Roof dimensions and the gap required between adjacent panels (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofGeometry {
    pub width: f64,
    pub length: f64,
    pub spacing: f64,
}

impl RoofGeometry {
    pub fn new(width: f64, length: f64) -> Self {
        Self { width, length, spacing: DEFAULT_SPACING }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}

impl Default for RoofGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_ROOF_WIDTH, DEFAULT_ROOF_LENGTH)
    }
}

/// Panel orientation on the roof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Panel width runs along the roof width, panel length along the roof length
    Landscape,
    /// Panel length runs along the roof width, panel width along the roof length
    Portrait,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Landscape => write!(f, "landscape"),
            Orientation::Portrait => write!(f, "portrait"),
        }
    }
}

/// Roof axis along which a row of panels is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoofAxis {
    Width,
    Length,
}

impl fmt::Display for RoofAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoofAxis::Width => write!(f, "roof width"),
            RoofAxis::Length => write!(f, "roof length"),
        }
    }
}

/// Grid fit for one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrientationFit {
    /// Panels counted along the roof width ("up")
    pub across_width: u64,
    /// Panels counted along the roof length ("across")
    pub across_length: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Landscape,
    Portrait,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutResult {
    pub landscape: OrientationFit,
    pub portrait: OrientationFit,
    pub recommendation: Recommendation,
}

impl LayoutResult {
    /// Panel count of the recommended orientation, or the common count on a tie
    pub fn recommended_total(&self) -> u64 {
        match self.recommendation {
            Recommendation::Portrait => self.portrait.total,
            Recommendation::Landscape | Recommendation::Tie => self.landscape.total,
        }
    }

    pub fn fit(&self, orientation: Orientation) -> &OrientationFit {
        match orientation {
            Orientation::Landscape => &self.landscape,
            Orientation::Portrait => &self.portrait,
        }
    }
}

// ===================== PLANNER =====================

/// Whole panels of size `panel_dim` (plus spacing) that fit in `roof_dim`.
fn count_along(
    roof_dim: f64,
    panel_dim: f64,
    spacing: f64,
    orientation: Orientation,
    axis: RoofAxis,
) -> Result<u64> {
    let divisor = panel_dim + spacing;
    if !(divisor > 0.0 && divisor.is_finite()) {
        return Err(CalcError::DegenerateSpacing { orientation, axis, divisor });
    }
    let count = (roof_dim / divisor).floor();
    // 2^64 is exactly representable, anything at or above it would saturate
    if count >= u64::MAX as f64 {
        return Err(CalcError::LayoutOverflow { orientation });
    }
    // Float-to-int casts saturate, so a non-positive roof gives 0
    Ok(count as u64)
}

/// Grid fit of `panel` on `roof` in the given orientation.
///
/// # Arguments
/// * `roof` - Roof dimensions and spacing
/// * `panel` - Panel dimensions (length, width)
/// * `orientation` - Which panel side runs along the roof width
///
/// # Returns
/// Counts along each roof axis and their product
pub fn fit_orientation(
    roof: &RoofGeometry,
    panel: &PanelGeometry,
    orientation: Orientation,
) -> Result<OrientationFit> {
    let (along_width, along_length) = match orientation {
        Orientation::Landscape => (panel.width, panel.length),
        Orientation::Portrait => (panel.length, panel.width),
    };

    let across_width =
        count_along(roof.width, along_width, roof.spacing, orientation, RoofAxis::Width)?;
    let across_length =
        count_along(roof.length, along_length, roof.spacing, orientation, RoofAxis::Length)?;

    let total = across_width
        .checked_mul(across_length)
        .ok_or(CalcError::LayoutOverflow { orientation })?;

    Ok(OrientationFit { across_width, across_length, total })
}

/// Recommend the orientation with the larger panel count.
pub fn recommend(landscape_total: u64, portrait_total: u64) -> Recommendation {
    use std::cmp::Ordering;

    match landscape_total.cmp(&portrait_total) {
        Ordering::Greater => Recommendation::Landscape,
        Ordering::Less => Recommendation::Portrait,
        Ordering::Equal => Recommendation::Tie,
    }
}

/// Compute landscape and portrait panel counts and the recommendation.
///
/// # Arguments
/// * `roof` - Roof dimensions and spacing
/// * `panel` - Panel dimensions, as used by the energy estimator
///
/// # Returns
/// Both fits and the recommendation, or `DegenerateSpacing` if any
/// `panel dimension + spacing` is not positive, or `LayoutOverflow` if a
/// panel count does not fit in a `u64`
pub fn compute_layout(roof: &RoofGeometry, panel: &PanelGeometry) -> Result<LayoutResult> {
    let landscape = fit_orientation(roof, panel, Orientation::Landscape)?;
    let portrait = fit_orientation(roof, panel, Orientation::Portrait)?;
    let recommendation = recommend(landscape.total, portrait.total);

    debug!(
        landscape = landscape.total,
        portrait = portrait.total,
        ?recommendation,
        "Computed panel layout"
    );

    Ok(LayoutResult { landscape, portrait, recommendation })
}

// ===================== TESTS =====================
