//! # stability-diagrams
//!
//! Loading, representation, and windowed querying of labeled quantum dot
//! stability diagrams.
//!
//! A stability diagram is a 2D grid of measured current values over two
//! gate-voltage axes. Diagrams are stored as gzip-compressed compact tables
//! inside a zip archive; their annotations (transition lines and charge
//! regions) come from a newline-delimited JSON label index. This crate loads
//! both, reconstructs the voltage axes, converts annotations to voltage
//! space, and exposes sliding-window patch extraction with geometry-derived
//! labels.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stability_diagrams::{load_diagram_set, LoadRequest, Settings};
//!
//! let request = LoadRequest::new(0.001, "louis_gaudreau", "diagrams.zip", "labels.ndjson");
//! let set = load_diagram_set(&request, &Settings::default())?;
//!
//! for diagram in &set {
//!     for (patch, has_line) in diagram.get_patches((18, 18), (0, 0), (6, 6)) {
//!         // Feed (patch, has_line) to training or inference.
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`coords`]: pixel-to-voltage coordinate mapping
//! - [`grid`]: value grids and the compact table loader
//! - [`geometry`]: transition lines and charge regions in voltage space
//! - [`regime`]: charge regime classification
//! - [`labels`]: typed records for the label index
//! - [`annotations`]: raw records to volt-space geometry
//! - [`diagram`]: the diagram entity and its queries
//! - [`loader`]: the diagram set loader
//! - [`normalization`]: global normalization statistics
//! - [`settings`]: loader and extraction settings
//! - [`render`]: the rendering callback seam
//! - [`error`]: error types

pub mod annotations;
pub mod coords;
pub mod diagram;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod labels;
pub mod loader;
pub mod normalization;
pub mod regime;
pub mod render;
pub mod settings;

// Re-export commonly used types
pub use coords::coord_to_volt;
pub use diagram::{Diagram, Patches};
pub use error::{Error, Result};
pub use geometry::{ChargeRegion, TransitionLine};
pub use grid::{load_grid, Axis, Precision, ValueGrid};
pub use labels::{DotCount, LabelIndex};
pub use loader::{load_diagram_set, DiagramSet, LoadRequest, LoadSummary};
pub use normalization::NormalizationStats;
pub use regime::ChargeRegime;
pub use render::{RenderFn, RenderRequest};
pub use settings::{NormalizationMode, Settings};
