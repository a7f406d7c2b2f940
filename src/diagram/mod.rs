//! The diagram entity: one labeled measurement grid and its queries.
//!
//! A [`Diagram`] owns the reconstructed voltage axes, the measured value
//! grid, optional geometric annotations, and (after the set-level
//! normalization pass) a normalized copy of the grid. All operations are
//! reads; the only mutations are the one-shot normalization and precision
//! transfer.

mod patches;

pub use patches::Patches;

use rand::Rng;

use crate::geometry::{volt_rect, ChargeRegion, TransitionLine};
use crate::grid::{Axis, Precision, ValueGrid};
use crate::regime::ChargeRegime;
use crate::render::{RenderFn, RenderRequest};
use crate::settings::{NormalizationMode, Settings};

/// Voltage at an axis index, extrapolating one uniform step past the end.
///
/// Window upper bounds index one past the last sampled pixel when a patch is
/// flush with the grid edge; the axes are uniform by construction, so the
/// boundary voltage is well defined.
pub(crate) fn axis_value(axis: &[f64], idx: usize) -> f64 {
    if idx < axis.len() {
        axis[idx]
    } else {
        let last = axis.len() - 1;
        let step = if axis.len() >= 2 { axis[1] - axis[0] } else { 0.0 };
        axis[last] + (idx - last) as f64 * step
    }
}

/// One stability diagram with its annotations.
#[derive(Debug, Clone)]
pub struct Diagram {
    name: String,
    x_axis: Axis,
    y_axis: Axis,
    values: ValueGrid,
    values_norm: Option<ValueGrid>,
    transition_lines: Option<Vec<TransitionLine>>,
    charge_regions: Option<Vec<ChargeRegion>>,
    settings: Settings,
}

impl Diagram {
    /// Assemble a diagram from loaded parts.
    ///
    /// Axis lengths must match the grid dimensions.
    ///
    /// # Panics
    ///
    /// Panics if an axis length differs from the matching grid dimension.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        x_axis: Axis,
        y_axis: Axis,
        values: ValueGrid,
        transition_lines: Option<Vec<TransitionLine>>,
        charge_regions: Option<Vec<ChargeRegion>>,
        settings: Settings,
    ) -> Self {
        assert_eq!(x_axis.len(), values.width(), "x axis length mismatch");
        assert_eq!(y_axis.len(), values.height(), "y axis length mismatch");
        Self {
            name: name.into(),
            x_axis,
            y_axis,
            values,
            values_norm: None,
            transition_lines,
            charge_regions,
            settings,
        }
    }

    /// Base name of the diagram file, without extension.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// X-axis voltages (gate 1).
    #[must_use]
    pub fn x_axis(&self) -> &[f64] {
        &self.x_axis
    }

    /// Y-axis voltages (gate 2).
    #[must_use]
    pub fn y_axis(&self) -> &[f64] {
        &self.y_axis
    }

    /// Raw measured values.
    #[must_use]
    pub fn values(&self) -> &ValueGrid {
        &self.values
    }

    /// Normalized values, present once the set-level pass has run.
    #[must_use]
    pub fn values_norm(&self) -> Option<&ValueGrid> {
        self.values_norm.as_ref()
    }

    /// Transition line annotations, if loaded.
    #[must_use]
    pub fn transition_lines(&self) -> Option<&[TransitionLine]> {
        self.transition_lines.as_deref()
    }

    /// Charge region annotations, if loaded.
    #[must_use]
    pub fn charge_regions(&self) -> Option<&[ChargeRegion]> {
        self.charge_regions.as_deref()
    }

    /// Settings this diagram was loaded with.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the normalization pass has run on this diagram.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.values_norm.is_some()
    }

    /// Extract one patch (data only, no label).
    ///
    /// `top_left` and `size` are pixel coordinates; bounds are the caller's
    /// responsibility and out-of-range windows are truncated per slice
    /// semantics. With `normalized`, the values follow the configured
    /// [`NormalizationMode`]: the precomputed full-set grid, a local [0, 1]
    /// rescale of the patch, or raw values. When the full-set grid is absent
    /// (oracle mode skipped the pass), raw values are returned.
    #[must_use]
    pub fn get_patch(
        &self,
        top_left: (usize, usize),
        size: (usize, usize),
        normalized: bool,
    ) -> ValueGrid {
        let (x, y) = top_left;
        let (size_x, size_y) = size;

        if normalized {
            match self.settings.normalization {
                NormalizationMode::TrainSet => {
                    let grid = self.values_norm.as_ref().unwrap_or(&self.values);
                    return grid.slice(x, y, size_x, size_y);
                }
                NormalizationMode::Patch => {
                    return self.values.slice(x, y, size_x, size_y).rescaled_unit();
                }
                NormalizationMode::None => {}
            }
        }

        self.values.slice(x, y, size_x, size_y)
    }

    /// Iterate over sliding-window patches with geometry-derived labels.
    ///
    /// Windows start at `(0, 0)` and advance by `patch_size - overlap` per
    /// axis; a window is yielded only when the full extraction fits, so the
    /// trailing partial row/column is dropped rather than padded. Each item
    /// is the raw patch values and a label that is `true` iff at least one
    /// transition line intersects the window's voltage rectangle shrunk
    /// inward by `label_offset` pixels per edge.
    ///
    /// In EWMA mode the extracted values gain 3 extra pixels on the low-X
    /// side while the label rectangle keeps the unextended bounds.
    ///
    /// Every call returns a fresh, finite iterator; it reports its exact
    /// length so callers can count patches without materializing them.
    #[must_use]
    pub fn get_patches(
        &self,
        patch_size: (usize, usize),
        overlap: (usize, usize),
        label_offset: (usize, usize),
    ) -> Patches<'_> {
        Patches::new(self, patch_size, overlap, label_offset)
    }

    /// Charge regime at a pixel coordinate.
    ///
    /// Out-of-range coordinates yield [`ChargeRegime::Unknown`], as does a
    /// point outside every labeled region. Overlapping regions resolve by
    /// first match in annotation order.
    #[must_use]
    pub fn get_charge_regime(&self, coord_x: usize, coord_y: usize) -> ChargeRegime {
        let (Some(&volt_x), Some(&volt_y)) = (self.x_axis.get(coord_x), self.y_axis.get(coord_y))
        else {
            return ChargeRegime::Unknown;
        };

        self.charge_regions
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find(|region| region.contains(volt_x, volt_y))
            .map_or(ChargeRegime::Unknown, ChargeRegion::regime)
    }

    /// Whether any transition line intersects the given sub-area.
    ///
    /// `offsets` shrinks the tested rectangle by an explicit per-edge pixel
    /// margin, independently for each axis.
    #[must_use]
    pub fn is_line_in_patch(
        &self,
        top_left: (usize, usize),
        patch_size: (usize, usize),
        offsets: (usize, usize),
    ) -> bool {
        let (coord_x, coord_y) = top_left;
        let (size_x, size_y) = patch_size;
        let (offset_x, offset_y) = offsets;

        let rect = volt_rect(
            axis_value(&self.x_axis, coord_x + offset_x),
            axis_value(&self.y_axis, coord_y + offset_y),
            axis_value(&self.x_axis, (coord_x + size_x).saturating_sub(offset_x)),
            axis_value(&self.y_axis, (coord_y + size_y).saturating_sub(offset_y)),
        );
        self.any_line_intersects(&rect)
    }

    pub(crate) fn any_line_intersects(&self, rect: &geo::Polygon<f64>) -> bool {
        self.transition_lines
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .any(|line| line.intersects(rect))
    }

    /// Largest valid top-left coordinate for a patch of the given size.
    #[must_use]
    pub fn max_patch_coordinates(&self, patch_size: (usize, usize)) -> (usize, usize) {
        (
            self.values.width().saturating_sub(patch_size.0),
            self.values.height().saturating_sub(patch_size.1),
        )
    }

    /// Pseudo-random top-left coordinate for a default-sized patch.
    ///
    /// Uniform over the positions where the patch stays in bounds; the patch
    /// size comes from the settings.
    #[must_use]
    pub fn random_starting_point(&self) -> (usize, usize) {
        let (max_x, max_y) = self.max_patch_coordinates(self.settings.patch_size);
        let mut rng = rand::thread_rng();
        (rng.gen_range(0..=max_x), rng.gen_range(0..=max_y))
    }

    /// Record the normalized copy of the grid against global statistics.
    pub(crate) fn set_normalized(&mut self, min_value: f64, max_value: f64) {
        self.values_norm = Some(self.values.rescaled(min_value, max_value));
    }

    /// Cast raw and normalized grids to the given precision, together.
    ///
    /// The normalized grid is skipped when absent. Repeating the same target
    /// leaves shapes and values unchanged.
    pub fn transfer(&mut self, precision: Precision) {
        self.values.cast(precision);
        if let Some(norm) = self.values_norm.as_mut() {
            norm.cast(precision);
        }
    }

    /// Forward this diagram to a render callback: a plain figure, then one
    /// with lines and one with regions when those annotations exist.
    pub fn render(&self, render: &RenderFn) {
        render(&RenderRequest {
            x_axis: &self.x_axis,
            y_axis: &self.y_axis,
            values: &self.values,
            transition_lines: None,
            charge_regions: None,
            file_name: format!("diagram_{}", self.name),
            title: format!("Diagram {}", self.name),
        });
        if let Some(lines) = self.transition_lines.as_deref() {
            render(&RenderRequest {
                x_axis: &self.x_axis,
                y_axis: &self.y_axis,
                values: &self.values,
                transition_lines: Some(lines),
                charge_regions: None,
                file_name: format!("diagram_{}_lines", self.name),
                title: format!("Diagram {}", self.name),
            });
        }
        if let Some(regions) = self.charge_regions.as_deref() {
            render(&RenderRequest {
                x_axis: &self.x_axis,
                y_axis: &self.y_axis,
                values: &self.values,
                transition_lines: self.transition_lines.as_deref(),
                charge_regions: Some(regions),
                file_name: format!("diagram_{}_area", self.name),
                title: format!("Diagram {}", self.name),
            });
        }
    }
}

impl std::fmt::Display for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (size: {}x{})",
            self.name,
            self.x_axis.len(),
            self.y_axis.len()
        )
    }
}
