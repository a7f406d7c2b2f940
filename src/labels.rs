//! Typed records for the newline-delimited JSON label index.
//!
//! The label export produces one JSON object per line. The source of these
//! records is an opaque upstream annotation tool; this module pins down the
//! fields this crate consumes into explicit structs, so a malformed record
//! fails deserialization loudly while a legitimately absent annotation is
//! just an empty `Option`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Dot-count classification of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotCount {
    /// Single quantum dot.
    Single,
    /// Double quantum dot.
    Double,
}

impl DotCount {
    /// Parse the radio-answer value of the dot-count classification.
    #[must_use]
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer {
            "single" => Some(Self::Single),
            "double" => Some(Self::Double),
            _ => None,
        }
    }

    /// Whether this classification is the single-dot one.
    #[must_use]
    pub fn is_single(self) -> bool {
        self == Self::Single
    }
}

/// One pixel-space annotation point.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PixelPoint {
    /// X pixel coordinate in label space.
    pub x: f64,
    /// Y pixel coordinate in label space.
    pub y: f64,
}

/// A geometric annotation object: a polyline or a polygon, tagged by name.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationObject {
    /// Tag of the object (e.g. `line_1`, `1_electron`).
    pub name: String,

    /// Ordered polyline points, for line objects.
    #[serde(default)]
    pub line: Option<Vec<PixelPoint>>,

    /// Ordered polygon points, for area objects.
    #[serde(default)]
    pub polygon: Option<Vec<PixelPoint>>,
}

/// Free-text answer of a classification.
#[derive(Debug, Clone, Deserialize)]
pub struct TextAnswer {
    /// Raw answer text.
    pub content: String,
}

/// Radio-button answer of a classification.
#[derive(Debug, Clone, Deserialize)]
pub struct RadioAnswer {
    /// Selected option name.
    pub name: String,
}

/// A per-diagram classification entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Classification {
    /// Classification name (e.g. `pixel_size_volt`, `nb_dot`).
    pub name: String,

    /// Free-text answer, if this classification is text-valued.
    #[serde(default)]
    pub text_answer: Option<TextAnswer>,

    /// Radio answer, if this classification is option-valued.
    #[serde(default)]
    pub radio_answer: Option<RadioAnswer>,
}

/// The annotation payload of one label.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Annotations {
    /// Per-diagram classifications.
    #[serde(default)]
    pub classifications: Vec<Classification>,

    /// Geometric annotation objects.
    #[serde(default)]
    pub objects: Vec<AnnotationObject>,
}

impl Annotations {
    /// Text answer of the named classification, if present.
    #[must_use]
    pub fn text_classification(&self, name: &str) -> Option<&str> {
        self.classifications
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.text_answer.as_ref().map(|a| a.content.as_str()))
    }

    /// Radio answer of the named classification, if present.
    #[must_use]
    pub fn radio_classification(&self, name: &str) -> Option<&str> {
        self.classifications
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.radio_answer.as_ref().map(|a| a.name.as_str()))
    }

    /// The pixel size (in volts) this diagram was labeled with.
    #[must_use]
    pub fn pixel_size_volt(&self) -> Option<f64> {
        self.text_classification("pixel_size_volt")?.trim().parse().ok()
    }

    /// The dot-count classification of this diagram.
    #[must_use]
    pub fn dot_count(&self) -> Option<DotCount> {
        DotCount::from_answer(self.radio_classification("nb_dot")?)
    }
}

/// One label version inside a project record.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelRecord {
    /// Annotation payload.
    #[serde(default)]
    pub annotations: Annotations,
}

/// A per-project record inside a diagram label.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    /// Project name, matched case-insensitively against the project tag.
    pub name: String,

    /// Label versions, most recent first.
    #[serde(default)]
    pub labels: Vec<LabelRecord>,
}

/// Identity of the labeled data row.
#[derive(Debug, Clone, Deserialize)]
pub struct DataRow {
    /// External identifier, the key diagrams are looked up by.
    pub external_id: String,
}

/// One line of the label index: all labels attached to one diagram image.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramLabel {
    /// Identity of the labeled row.
    pub data_row: DataRow,

    /// Project records keyed by opaque project id.
    #[serde(default)]
    pub projects: HashMap<String, ProjectRecord>,
}

impl DiagramLabel {
    /// Annotations of the first label in the project whose name matches
    /// `project_tag` case-insensitively, if any.
    #[must_use]
    pub fn project_annotations(&self, project_tag: &str) -> Option<&Annotations> {
        let tag = project_tag.to_uppercase();
        self.projects
            .values()
            .find(|p| p.name.to_uppercase() == tag)
            .and_then(|p| p.labels.first())
            .map(|l| &l.annotations)
    }
}

/// The fully parsed label index, keyed by external diagram identifier.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    records: HashMap<String, DiagramLabel>,
}

impl LabelIndex {
    /// Parse a newline-delimited JSON label index from a reader.
    ///
    /// The whole index is materialized before any diagram is processed;
    /// lookups are by external identifier. Blank lines are ignored, any
    /// malformed line aborts with [`Error::LabelIndex`].
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut records = HashMap::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let label: DiagramLabel =
                serde_json::from_str(&line).map_err(|e| Error::LabelIndex {
                    line: i + 1,
                    reason: e.to_string(),
                })?;
            records.insert(label.data_row.external_id.clone(), label);
        }
        Ok(Self { records })
    }

    /// Parse the label index from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Look up the label record for an external identifier.
    #[must_use]
    pub fn get(&self, external_id: &str) -> Option<&DiagramLabel> {
        self.records.get(external_id)
    }

    /// Number of labeled diagrams in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
