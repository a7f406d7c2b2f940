//! Rendering collaborator seam.
//!
//! Plotting is implemented elsewhere; this crate only forwards diagram data
//! through a caller-provided callback so it never depends on a drawing
//! backend.

use crate::geometry::{ChargeRegion, TransitionLine};
use crate::grid::ValueGrid;

/// Data handed to the render callback for one figure.
#[derive(Debug)]
pub struct RenderRequest<'a> {
    /// X-axis voltages.
    pub x_axis: &'a [f64],
    /// Y-axis voltages.
    pub y_axis: &'a [f64],
    /// Raw measured values.
    pub values: &'a ValueGrid,
    /// Transition lines to overlay, if any.
    pub transition_lines: Option<&'a [TransitionLine]>,
    /// Charge regions to overlay, if any.
    pub charge_regions: Option<&'a [ChargeRegion]>,
    /// Output file name, without extension.
    pub file_name: String,
    /// Figure title.
    pub title: String,
}

/// Render callback type.
///
/// Receives one figure's worth of diagram data; the implementation owns the
/// actual drawing and file output.
pub type RenderFn = Box<dyn Fn(&RenderRequest<'_>) + Send + Sync>;
