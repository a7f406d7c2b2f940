//! Loader and patch-extraction settings.
//!
//! These options mirror the global experiment configuration that owns this
//! subsystem. The crate never reads configuration files itself; callers build
//! a [`Settings`] value and pass it to the set loader, which stores a copy in
//! every [`Diagram`](crate::Diagram).

use serde::{Deserialize, Serialize};

/// How patch values are normalized by
/// [`Diagram::get_patch`](crate::Diagram::get_patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationMode {
    /// Use the grid normalized once against the full training-set min/max.
    #[default]
    TrainSet,

    /// Rescale each patch to [0, 1] using its own min/max.
    Patch,

    /// No normalization, raw measured values.
    None,
}

/// Settings consumed by diagram loading and patch extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Patch normalization mode.
    pub normalization: NormalizationMode,

    /// Widen raw patch extraction by 3 pixels on the low-X side, for the
    /// trailing-average (EWMA) pre-processing step. The label rectangle keeps
    /// the unextended bounds.
    pub use_ewma: bool,

    /// Also load annotations tagged as parasitic lines.
    pub load_parasitic_lines: bool,

    /// Forward each loaded diagram to the render callback, when one is set.
    pub plot_diagrams: bool,

    /// Oracle mode: the normalization pass is skipped entirely.
    pub use_oracle: bool,

    /// Default patch size in pixels (x, y), used by
    /// [`Diagram::random_starting_point`](crate::Diagram::random_starting_point).
    pub patch_size: (usize, usize),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            normalization: NormalizationMode::default(),
            use_ewma: false,
            load_parasitic_lines: false,
            plot_diagrams: false,
            use_oracle: false,
            patch_size: (10, 10),
        }
    }
}

impl Settings {
    /// Set the normalization mode.
    #[must_use]
    pub fn with_normalization(mut self, mode: NormalizationMode) -> Self {
        self.normalization = mode;
        self
    }

    /// Enable or disable the EWMA extraction margin.
    #[must_use]
    pub fn with_ewma(mut self, enabled: bool) -> Self {
        self.use_ewma = enabled;
        self
    }

    /// Enable or disable loading of parasitic line annotations.
    #[must_use]
    pub fn with_parasitic_lines(mut self, enabled: bool) -> Self {
        self.load_parasitic_lines = enabled;
        self
    }

    /// Enable or disable render callbacks for loaded diagrams.
    #[must_use]
    pub fn with_plot_diagrams(mut self, enabled: bool) -> Self {
        self.plot_diagrams = enabled;
        self
    }

    /// Enable or disable oracle mode.
    #[must_use]
    pub fn with_oracle(mut self, enabled: bool) -> Self {
        self.use_oracle = enabled;
        self
    }

    /// Set the default patch size in pixels (x, y).
    #[must_use]
    pub fn with_patch_size(mut self, x: usize, y: usize) -> Self {
        self.patch_size = (x, y);
        self
    }

    /// Number of extra low-X pixels extracted per patch in EWMA mode.
    pub(crate) fn ewma_margin(&self) -> usize {
        if self.use_ewma { 3 } else { 0 }
    }
}
