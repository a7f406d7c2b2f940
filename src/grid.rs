//! Measurement grids and the compact table loader.
//!
//! Diagrams are stored as compact comma-delimited tables: the first row holds
//! `(x_start, y_start, step)` and every following row is one line of the
//! measured value matrix. [`load_grid`] reconstructs the voltage axes from
//! the header and returns the matrix as a [`ValueGrid`].

use std::io::Read;

use crate::error::{Error, Result};

/// Ordered voltage values along one axis, strictly increasing.
pub type Axis = Vec<f64>;

/// Storage precision of a value grid.
///
/// Mirrors the dtype of the tensors this data feeds; casting to [`F32`]
/// rounds every value through `f32` once, after which further casts to the
/// same target are no-ops.
///
/// [`F32`]: Precision::F32
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Single precision.
    F32,
    /// Double precision.
    #[default]
    F64,
}

/// A 2D matrix of measured values with shape `(y_axis_len, x_axis_len)`.
///
/// Row-major storage; row 0 corresponds to Y-axis index 0 after any
/// load-time inversion.
#[derive(Debug, Clone)]
pub struct ValueGrid {
    buf: Vec<f64>,
    width: usize,
    height: usize,
    precision: Precision,
}

impl ValueGrid {
    /// Build a grid from equally sized rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows are ragged.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut buf = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.len(), width, "ragged rows");
            buf.extend(row);
        }
        Self {
            buf,
            width,
            height,
            precision: Precision::F64,
        }
    }

    /// Grid width (X-axis length).
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (Y-axis length).
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid shape as `(height, width)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Storage precision tag.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Value at pixel `(x, y)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.buf[y * self.width + x])
        } else {
            None
        }
    }

    /// Iterate over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.height).map(move |y| &self.buf[y * self.width..(y + 1) * self.width])
    }

    /// Iterate over all values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.buf.iter().copied()
    }

    /// Extract the sub-grid with top-left pixel `(x, y)` and the given size.
    ///
    /// Standard slicing semantics: the window is truncated at the grid
    /// bounds, possibly down to an empty grid. No error is raised.
    #[must_use]
    pub fn slice(&self, x: usize, y: usize, width: usize, height: usize) -> Self {
        let x0 = x.min(self.width);
        let y0 = y.min(self.height);
        let x1 = x.saturating_add(width).min(self.width);
        let y1 = y.saturating_add(height).min(self.height);

        let mut buf = Vec::with_capacity((x1 - x0) * (y1 - y0));
        for row_y in y0..y1 {
            buf.extend_from_slice(&self.buf[row_y * self.width + x0..row_y * self.width + x1]);
        }
        Self {
            buf,
            width: x1 - x0,
            height: y1 - y0,
            precision: self.precision,
        }
    }

    /// Minimum value, or `None` for an empty grid.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.values().reduce(f64::min)
    }

    /// Maximum value, or `None` for an empty grid.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.values().reduce(f64::max)
    }

    /// Rescale every value as `(v - min) / (max - min)`.
    ///
    /// A degenerate range (`max == min`) yields an all-zero grid.
    #[must_use]
    pub fn rescaled(&self, min: f64, max: f64) -> Self {
        let range = max - min;
        let buf = self
            .values()
            .map(|v| if range == 0.0 { 0.0 } else { (v - min) / range })
            .collect();
        Self {
            buf,
            width: self.width,
            height: self.height,
            precision: self.precision,
        }
    }

    /// Rescale this grid to [0, 1] by its own min/max.
    #[must_use]
    pub fn rescaled_unit(&self) -> Self {
        match (self.min(), self.max()) {
            (Some(min), Some(max)) => self.rescaled(min, max),
            _ => self.clone(),
        }
    }

    /// Cast the grid to the given precision, in place.
    ///
    /// Casting to [`Precision::F32`] rounds each value through `f32`;
    /// repeating a cast to the current precision changes nothing.
    pub fn cast(&mut self, precision: Precision) {
        if self.precision == precision {
            return;
        }
        if precision == Precision::F32 {
            for value in &mut self.buf {
                *value = f64::from(*value as f32);
            }
        }
        self.precision = precision;
    }
}

impl PartialEq for ValueGrid {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.buf == other.buf
    }
}

/// Load a compact diagram table from a byte stream.
///
/// Row 0 must hold at least `(x_start, y_start, step)`; all later rows form
/// the value matrix and must share one width. With `invert_y` the matrix row
/// order is reversed before the axes are reconstructed, converting from the
/// image convention (origin top-left) to Cartesian (origin bottom-left).
///
/// `name` only provides context for [`Error::Grid`].
pub fn load_grid(name: &str, reader: impl Read, invert_y: bool) -> Result<(Axis, Axis, ValueGrid)> {
    let grid_err = |reason: String| Error::Grid {
        name: name.to_string(),
        reason,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let header = records
        .next()
        .ok_or_else(|| grid_err("empty table".to_string()))?
        .map_err(|e| grid_err(e.to_string()))?;
    if header.len() < 3 {
        return Err(grid_err(format!(
            "header row has {} field(s), expected (x_start, y_start, step)",
            header.len()
        )));
    }
    let parse_cell = |cell: &str, row: usize| -> Result<f64> {
        cell.trim()
            .parse::<f64>()
            .map_err(|_| grid_err(format!("non-numeric cell {cell:?} in row {row}")))
    };
    let x_start = parse_cell(&header[0], 0)?;
    let y_start = parse_cell(&header[1], 0)?;
    let step = parse_cell(&header[2], 0)?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (i, record) in records.enumerate() {
        let record = record.map_err(|e| grid_err(e.to_string()))?;
        let row: Vec<f64> = record
            .iter()
            .map(|cell| parse_cell(cell, i + 1))
            .collect::<Result<_>>()?;
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(grid_err(format!(
                    "ragged row {}: {} field(s), expected {}",
                    i + 1,
                    row.len(),
                    first.len()
                )));
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(grid_err("table has no value rows".to_string()));
    }

    if invert_y {
        rows.reverse();
    }

    let values = ValueGrid::from_rows(rows);
    let x_axis = (0..values.width()).map(|i| i as f64 * step + x_start).collect();
    let y_axis = (0..values.height()).map(|j| j as f64 * step + y_start).collect();

    Ok((x_axis, y_axis, values))
}
