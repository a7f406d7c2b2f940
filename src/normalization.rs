//! Normalization statistics collaborator.
//!
//! The training pipeline records the global min/max of the training set once;
//! diagrams loaded later are rescaled against those same bounds so inference
//! sees values in the range the model was trained on.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Global min/max statistics used for the one-shot normalization pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationStats {
    /// Minimum value observed on the training set.
    pub min_value: f64,
    /// Maximum value observed on the training set.
    pub max_value: f64,
}

impl NormalizationStats {
    /// Create statistics from explicit bounds.
    #[must_use]
    pub fn new(min_value: f64, max_value: f64) -> Self {
        Self { min_value, max_value }
    }

    /// Load statistics from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Normalization(format!("cannot read {}: {e}", path.display()))
        })?;
        let stats: Self = serde_json::from_str(&content)
            .map_err(|e| Error::Normalization(format!("{}: {e}", path.display())))?;
        Ok(stats)
    }
}
