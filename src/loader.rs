//! Diagram set loading from a label index and a diagram archive.
//!
//! The entry point is [`load_diagram_set`]: it parses the newline-delimited
//! JSON label index fully, then walks one subdirectory of the zip archive of
//! gzip-compressed grid tables, filtering entries against their labels before
//! decoding them into [`Diagram`] values.
//!
//! Filtering is control flow, not errors: diagrams without usable labels,
//! outside the whitelist, or of the wrong dot type are tallied in
//! [`LoadSummary`] and skipped. Only a missing archive subdirectory aborts
//! the whole load.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use flate2::read::GzDecoder;
use log::{debug, error, info, warn};
use rayon::prelude::*;
use zip::ZipArchive;

use crate::annotations::{load_charge_regions, load_lines};
use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::grid::load_grid;
use crate::labels::{Annotations, LabelIndex};
use crate::normalization::NormalizationStats;
use crate::render::RenderFn;
use crate::settings::Settings;

/// Project tag the label index is filtered by, matched case-insensitively.
const PROJECT_TAG: &str = "QDSD";

/// Annotation tags of transition lines.
const LINE_LABELS: &[&str] = &["line_1", "line_2"];

/// Annotation tag of parasitic lines, loaded only when enabled.
const PARASITIC_LINE_LABEL: &str = "line_parasite";

/// Snap margin applied to annotation coordinates, in pixels.
const SNAP_MARGIN_PX: f64 = 1.0;

/// Per-load skip statistics.
///
/// These are observational: the loader reports them through the log facade
/// and returns them alongside the diagrams, but never raises for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Entries with no usable label (missing record, project, classification,
    /// or empty annotation lists).
    pub no_label: usize,
    /// Entries excluded by the whitelist.
    pub excluded: usize,
    /// Entries of the other dot type.
    pub filtered: usize,
    /// Entries whose grid table failed to parse.
    pub malformed: usize,
}

/// Parameters of one diagram set load.
pub struct LoadRequest {
    /// Pixel size of the archive subdirectory to read, in volts.
    pub pixel_size: f64,

    /// Research group name inside the archive.
    pub research_group: String,

    /// Path to the zip archive of gzip-compressed grid tables.
    pub archive_path: PathBuf,

    /// Path to the newline-delimited JSON label index.
    pub labels_path: PathBuf,

    /// Load single-dot diagrams when `true`, double-dot ones otherwise.
    pub single_dot: bool,

    /// Load transition line annotations.
    pub load_lines: bool,

    /// Load charge region annotations.
    pub load_areas: bool,

    /// When set, only diagrams whose base name is listed are loaded.
    pub white_list: Option<Vec<String>>,

    /// Render callback invoked per loaded diagram when plotting is enabled.
    pub renderer: Option<RenderFn>,
}

impl LoadRequest {
    /// Create a request with default filters: single dot, lines and areas
    /// loaded, no whitelist, no renderer.
    #[must_use]
    pub fn new(
        pixel_size: f64,
        research_group: impl Into<String>,
        archive_path: impl Into<PathBuf>,
        labels_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            pixel_size,
            research_group: research_group.into(),
            archive_path: archive_path.into(),
            labels_path: labels_path.into(),
            single_dot: true,
            load_lines: true,
            load_areas: true,
            white_list: None,
            renderer: None,
        }
    }

    /// Select single-dot (`true`) or double-dot (`false`) diagrams.
    #[must_use]
    pub fn with_single_dot(mut self, single_dot: bool) -> Self {
        self.single_dot = single_dot;
        self
    }

    /// Enable or disable loading of line annotations.
    #[must_use]
    pub fn with_lines(mut self, load_lines: bool) -> Self {
        self.load_lines = load_lines;
        self
    }

    /// Enable or disable loading of charge region annotations.
    #[must_use]
    pub fn with_areas(mut self, load_areas: bool) -> Self {
        self.load_areas = load_areas;
        self
    }

    /// Restrict the load to the given base names (without extension).
    #[must_use]
    pub fn with_white_list(mut self, names: Vec<String>) -> Self {
        self.white_list = Some(names);
        self
    }

    /// Set the render callback.
    #[must_use]
    pub fn with_renderer(mut self, renderer: RenderFn) -> Self {
        self.renderer = Some(renderer);
        self
    }
}

/// A set of diagrams produced by one load call.
///
/// Immutable afterwards except for the one-shot normalization pass and
/// per-diagram precision transfer.
#[derive(Debug, Clone)]
pub struct DiagramSet {
    diagrams: Vec<Diagram>,
    summary: LoadSummary,
    settings: Settings,
}

impl DiagramSet {
    /// The loaded diagrams, in archive order.
    #[must_use]
    pub fn diagrams(&self) -> &[Diagram] {
        &self.diagrams
    }

    /// Mutable access for precision transfer.
    pub fn diagrams_mut(&mut self) -> &mut [Diagram] {
        &mut self.diagrams
    }

    /// Consume the set, keeping only the diagrams.
    #[must_use]
    pub fn into_diagrams(self) -> Vec<Diagram> {
        self.diagrams
    }

    /// Skip statistics of the load.
    #[must_use]
    pub fn summary(&self) -> LoadSummary {
        self.summary
    }

    /// Number of loaded diagrams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagrams.len()
    }

    /// Whether the load produced no diagrams.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }

    /// Iterate over the diagrams.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagram> {
        self.diagrams.iter()
    }

    /// Normalize every diagram against global training-set statistics.
    ///
    /// Skipped entirely in oracle mode, leaving the normalized grids absent.
    pub fn normalize(&mut self, stats: NormalizationStats) {
        if self.settings.use_oracle {
            return;
        }
        for diagram in &mut self.diagrams {
            diagram.set_normalized(stats.min_value, stats.max_value);
        }
    }
}

impl<'a> IntoIterator for &'a DiagramSet {
    type Item = &'a Diagram;
    type IntoIter = std::slice::Iter<'a, Diagram>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagrams.iter()
    }
}

/// One archive entry that survived the label filters and awaits decoding.
struct Candidate {
    base_name: String,
    /// Raw gzip bytes of the grid table.
    bytes: Vec<u8>,
    pixel_size_volt: f64,
    annotations: Annotations,
}

/// Decode outcome of one candidate.
enum Outcome {
    Loaded(Box<Diagram>),
    NoAnnotations { base_name: String, kind: &'static str },
    Malformed { base_name: String, error: Error },
}

/// Archive subdirectory for a pixel size and research group.
///
/// Always uses `/` separators, whatever the host OS. Integral millivolt
/// sizes keep one decimal place (`1.0mV`), matching the layout the archives
/// were produced with.
fn archive_prefix(pixel_size: f64, research_group: &str) -> String {
    let millivolts = pixel_size * 1000.0;
    if millivolts.fract() == 0.0 {
        format!("{millivolts:.1}mV/{research_group}/")
    } else {
        format!("{millivolts}mV/{research_group}/")
    }
}

/// Base name of an archive entry: the part after the subdirectory prefix,
/// with `.csv.gz` stripped.
fn entry_base_name(entry_name: &str, prefix: &str) -> Option<String> {
    let rest = entry_name.strip_prefix(prefix)?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    let rest = rest.strip_suffix(".gz").unwrap_or(rest);
    let rest = rest.strip_suffix(".csv").unwrap_or(rest);
    Some(rest.to_string())
}

/// Decode one candidate into a diagram, or report why it could not be.
fn build_diagram(candidate: Candidate, request: &LoadRequest, settings: &Settings) -> Outcome {
    let Candidate {
        base_name,
        bytes,
        pixel_size_volt,
        annotations,
    } = candidate;

    let decoder = GzDecoder::new(&bytes[..]);
    let (x_axis, y_axis, values) = match load_grid(&base_name, decoder, true) {
        Ok(parts) => parts,
        Err(error) => return Outcome::Malformed { base_name, error },
    };

    let mut transition_lines = None;
    if request.load_lines {
        let mut line_labels: Vec<&str> = LINE_LABELS.to_vec();
        if settings.load_parasitic_lines {
            line_labels.push(PARASITIC_LINE_LABEL);
        }
        let lines = load_lines(
            annotations
                .objects
                .iter()
                .filter(|o| line_labels.contains(&o.name.as_str())),
            &x_axis,
            &y_axis,
            pixel_size_volt,
            SNAP_MARGIN_PX,
        );
        if lines.is_empty() {
            return Outcome::NoAnnotations {
                base_name,
                kind: "line",
            };
        }
        transition_lines = Some(lines);
    }

    let mut charge_regions = None;
    if request.load_areas {
        let regions = load_charge_regions(
            annotations
                .objects
                .iter()
                .filter(|o| o.name.contains("electron")),
            &x_axis,
            &y_axis,
            pixel_size_volt,
            SNAP_MARGIN_PX,
        );
        if regions.is_empty() {
            return Outcome::NoAnnotations {
                base_name,
                kind: "charge",
            };
        }
        charge_regions = Some(regions);
    }

    Outcome::Loaded(Box::new(Diagram::new(
        base_name,
        x_axis,
        y_axis,
        values,
        transition_lines,
        charge_regions,
        settings.clone(),
    )))
}

/// Load stability diagrams and annotations from files.
///
/// The label index is parsed in full first; each archive entry under the
/// `{pixel_size}mV/{research_group}/` subdirectory is then filtered against
/// it (whitelist, label presence, project tag, required classifications, dot
/// type) before its grid is decoded and its annotations converted to voltage
/// space. Candidates that pass the filters are decoded in parallel; the
/// result keeps archive entry order.
///
/// Returns [`Error::Configuration`] when the subdirectory is absent. An
/// otherwise empty result is reported at error level but still returned.
pub fn load_diagram_set(request: &LoadRequest, settings: &Settings) -> Result<DiagramSet> {
    let labels = LabelIndex::from_path(&request.labels_path)?;
    debug!("{} labeled diagrams found", labels.len());

    let file = File::open(&request.archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let prefix = archive_prefix(request.pixel_size, &request.research_group);

    let mut summary = LoadSummary::default();
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut dir_found = false;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if !entry.name().starts_with(prefix.as_str()) {
            continue;
        }
        dir_found = true;

        let Some(base_name) = entry_base_name(entry.name(), &prefix) else {
            continue;
        };

        if let Some(white_list) = &request.white_list {
            if !white_list.iter().any(|name| *name == base_name) {
                summary.excluded += 1;
                continue;
            }
        }

        let Some(label) = labels.get(&format!("{base_name}.png")) else {
            debug!("No label found for {base_name}");
            summary.no_label += 1;
            continue;
        };

        let Some(annotations) = label.project_annotations(PROJECT_TAG) else {
            debug!("No label found for {base_name}");
            summary.no_label += 1;
            continue;
        };

        let (Some(pixel_size_volt), Some(dot_count)) =
            (annotations.pixel_size_volt(), annotations.dot_count())
        else {
            warn!("Invalid label for {base_name}");
            summary.no_label += 1;
            continue;
        };

        if dot_count.is_single() != request.single_dot {
            summary.filtered += 1;
            continue;
        }

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        candidates.push(Candidate {
            base_name,
            bytes,
            pixel_size_volt,
            annotations: annotations.clone(),
        });
    }

    if !dir_found {
        return Err(Error::Configuration(format!(
            "folder {:?} not found in the archive {:?}; \
             check that this pixel size and research group exist",
            prefix, request.archive_path
        )));
    }

    let outcomes: Vec<Outcome> = candidates
        .into_par_iter()
        .map(|candidate| build_diagram(candidate, request, settings))
        .collect();

    let mut diagrams = Vec::new();
    for outcome in outcomes {
        match outcome {
            Outcome::Loaded(diagram) => diagrams.push(*diagram),
            Outcome::NoAnnotations { base_name, kind } => {
                debug!("No {kind} label found for {base_name}");
                summary.no_label += 1;
            }
            Outcome::Malformed { base_name, error } => {
                warn!("Skipping {base_name}: {error}");
                summary.malformed += 1;
            }
        }
    }

    if summary.no_label > 0 {
        warn!("{} diagram(s) skipped because no label found", summary.no_label);
    }
    if summary.excluded > 0 {
        info!("{} diagram(s) excluded because not in white list", summary.excluded);
    }
    if summary.filtered > 0 {
        info!(
            "{} diagram(s) filtered because not the selected type of diagram",
            summary.filtered
        );
    }
    if summary.malformed > 0 {
        warn!("{} diagram(s) skipped because the grid table was malformed", summary.malformed);
    }
    if diagrams.is_empty() {
        error!(
            "No diagram loaded from {:?} in {:?}",
            prefix, request.archive_path
        );
    }

    if settings.plot_diagrams {
        if let Some(renderer) = &request.renderer {
            for diagram in &diagrams {
                diagram.render(renderer);
            }
        }
    }

    Ok(DiagramSet {
        diagrams,
        summary,
        settings: settings.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use serde_json::{json, Value};
    use tempfile::NamedTempFile;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    /// 4x4 grid with axes starting at 0 V and a 1 mV step.
    const GRID_CSV: &str = "0,0,0.001\n1,2,3,4\n5,6,7,8\n9,10,11,12\n13,14,15,16";

    fn write_archive(entries: &[(&str, &str)]) -> NamedTempFile {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = ZipWriter::new(&mut cursor);
            for (name, csv) in entries {
                writer
                    .start_file(format!("1.0mV/testlab/{name}.csv.gz"), SimpleFileOptions::default())
                    .unwrap();
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(csv.as_bytes()).unwrap();
                writer.write_all(&encoder.finish().unwrap()).unwrap();
            }
            writer.finish().unwrap();
        }
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(cursor.get_ref()).unwrap();
        file.flush().unwrap();
        file
    }

    fn default_objects() -> Value {
        json!([
            {"name": "line_1", "line": [{"x": 0, "y": 0}, {"x": 3, "y": 3}]},
            {"name": "1_electron",
             "polygon": [{"x": 0, "y": 0}, {"x": 3, "y": 0}, {"x": 3, "y": 3}, {"x": 0, "y": 3}]}
        ])
    }

    fn label_line(
        base_name: &str,
        pixel_size: Option<f64>,
        nb_dot: Option<&str>,
        objects: Value,
    ) -> String {
        let mut classifications = Vec::new();
        if let Some(size) = pixel_size {
            classifications.push(json!({
                "name": "pixel_size_volt",
                "text_answer": {"content": size.to_string()}
            }));
        }
        if let Some(dot) = nb_dot {
            classifications.push(json!({
                "name": "nb_dot",
                "radio_answer": {"name": dot}
            }));
        }
        json!({
            "data_row": {"external_id": format!("{base_name}.png")},
            "projects": {
                "p1": {
                    "name": "QDSD",
                    "labels": [{"annotations": {
                        "classifications": classifications,
                        "objects": objects
                    }}]
                }
            }
        })
        .to_string()
    }

    fn write_labels(lines: &[String]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn request(archive: &NamedTempFile, labels: &NamedTempFile) -> LoadRequest {
        LoadRequest::new(0.001, "testlab", archive.path(), labels.path())
    }

    #[test]
    fn test_load_end_to_end() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("single"), default_objects())]);

        let set = load_diagram_set(&request(&archive, &labels), &Settings::default()).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.summary(), LoadSummary::default());
        let diagram = &set.diagrams()[0];
        assert_eq!(diagram.name(), "dot1");
        assert_eq!(diagram.values().shape(), (4, 4));
        assert_eq!(diagram.x_axis().len(), 4);
        assert_eq!(diagram.transition_lines().unwrap().len(), 1);
        assert_eq!(diagram.charge_regions().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_pixel_size_counts_unlabeled_not_filtered() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let labels = write_labels(&[label_line("dot1", None, Some("single"), default_objects())]);

        let set = load_diagram_set(&request(&archive, &labels), &Settings::default()).unwrap();

        assert!(set.is_empty());
        assert_eq!(set.summary().no_label, 1);
        assert_eq!(set.summary().filtered, 0);
    }

    #[test]
    fn test_wrong_dot_type_counts_filtered() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("double"), default_objects())]);

        let set = load_diagram_set(&request(&archive, &labels), &Settings::default()).unwrap();

        assert!(set.is_empty());
        assert_eq!(set.summary().filtered, 1);
        assert_eq!(set.summary().no_label, 0);
    }

    #[test]
    fn test_double_dot_request_keeps_double() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("double"), default_objects())]);

        let req = request(&archive, &labels).with_single_dot(false);
        let set = load_diagram_set(&req, &Settings::default()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_whitelist_excludes() {
        let archive = write_archive(&[("dot1", GRID_CSV), ("dot2", GRID_CSV)]);
        let labels = write_labels(&[
            label_line("dot1", Some(0.001), Some("single"), default_objects()),
            label_line("dot2", Some(0.001), Some("single"), default_objects()),
        ]);

        let req = request(&archive, &labels).with_white_list(vec!["dot2".to_string()]);
        let set = load_diagram_set(&req, &Settings::default()).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.diagrams()[0].name(), "dot2");
        assert_eq!(set.summary().excluded, 1);
    }

    #[test]
    fn test_unlabeled_entry_skipped() {
        let archive = write_archive(&[("dot1", GRID_CSV), ("unlabeled", GRID_CSV)]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("single"), default_objects())]);

        let set = load_diagram_set(&request(&archive, &labels), &Settings::default()).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.summary().no_label, 1);
    }

    #[test]
    fn test_missing_subdirectory_is_configuration_error() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("single"), default_objects())]);

        let req = LoadRequest::new(0.001, "otherlab", archive.path(), labels.path());
        let err = load_diagram_set(&req, &Settings::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_malformed_grid_counted_and_skipped() {
        let archive = write_archive(&[("bad", "0,0,0.001\n1,2\n3"), ("dot1", GRID_CSV)]);
        let labels = write_labels(&[
            label_line("bad", Some(0.001), Some("single"), default_objects()),
            label_line("dot1", Some(0.001), Some("single"), default_objects()),
        ]);

        let set = load_diagram_set(&request(&archive, &labels), &Settings::default()).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.summary().malformed, 1);
    }

    #[test]
    fn test_empty_line_annotations_count_unlabeled() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let objects = json!([
            {"name": "1_electron",
             "polygon": [{"x": 0, "y": 0}, {"x": 3, "y": 0}, {"x": 0, "y": 3}]}
        ]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("single"), objects)]);

        let set = load_diagram_set(&request(&archive, &labels), &Settings::default()).unwrap();

        assert!(set.is_empty());
        assert_eq!(set.summary().no_label, 1);
    }

    #[test]
    fn test_annotations_skipped_when_disabled() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("single"), json!([]))]);

        let req = request(&archive, &labels).with_lines(false).with_areas(false);
        let set = load_diagram_set(&req, &Settings::default()).unwrap();

        assert_eq!(set.len(), 1);
        assert!(set.diagrams()[0].transition_lines().is_none());
        assert!(set.diagrams()[0].charge_regions().is_none());
    }

    #[test]
    fn test_parasitic_lines_loaded_when_enabled() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let objects = json!([
            {"name": "line_parasite", "line": [{"x": 0, "y": 0}, {"x": 3, "y": 3}]},
            {"name": "1_electron",
             "polygon": [{"x": 0, "y": 0}, {"x": 3, "y": 0}, {"x": 0, "y": 3}]}
        ]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("single"), objects)]);

        let without = load_diagram_set(&request(&archive, &labels), &Settings::default()).unwrap();
        assert!(without.is_empty());
        assert_eq!(without.summary().no_label, 1);

        let settings = Settings::default().with_parasitic_lines(true);
        let with = load_diagram_set(&request(&archive, &labels), &settings).unwrap();
        assert_eq!(with.len(), 1);
        assert_eq!(with.diagrams()[0].transition_lines().unwrap().len(), 1);
    }

    #[test]
    fn test_normalize_pass() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("single"), default_objects())]);

        let mut set = load_diagram_set(&request(&archive, &labels), &Settings::default()).unwrap();
        assert!(!set.diagrams()[0].is_normalized());

        set.normalize(NormalizationStats::new(1.0, 17.0));
        let diagram = &set.diagrams()[0];
        assert!(diagram.is_normalized());
        let norm = diagram.values_norm().unwrap();
        assert_eq!(norm.shape(), diagram.values().shape());
        // Raw value 16 lands one step below the max of the range [1, 17].
        assert_eq!(norm.max().unwrap(), (16.0 - 1.0) / 16.0);
    }

    #[test]
    fn test_normalize_skipped_in_oracle_mode() {
        let archive = write_archive(&[("dot1", GRID_CSV)]);
        let labels = write_labels(&[label_line("dot1", Some(0.001), Some("single"), default_objects())]);

        let settings = Settings::default().with_oracle(true);
        let mut set = load_diagram_set(&request(&archive, &labels), &settings).unwrap();
        set.normalize(NormalizationStats::new(0.0, 1.0));
        assert!(!set.diagrams()[0].is_normalized());
    }

    #[test]
    fn test_archive_prefix_formats() {
        // Integral sizes keep the trailing ".0" the archive layout carries.
        assert_eq!(archive_prefix(0.001, "lab"), "1.0mV/lab/");
        assert_eq!(archive_prefix(0.002, "lab"), "2.0mV/lab/");
        assert_eq!(archive_prefix(0.0025, "lab"), "2.5mV/lab/");
    }

    #[test]
    fn test_entry_base_name() {
        assert_eq!(
            entry_base_name("1.0mV/lab/dot_1.csv.gz", "1.0mV/lab/"),
            Some("dot_1".to_string())
        );
        assert_eq!(entry_base_name("1.0mV/lab/", "1.0mV/lab/"), None);
        assert_eq!(entry_base_name("1.0mV/lab/sub/x.csv.gz", "1.0mV/lab/"), None);
        assert_eq!(entry_base_name("2.5mV/lab/dot.csv.gz", "1.0mV/lab/"), None);
    }
}
