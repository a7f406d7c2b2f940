//! Geometric annotation objects in voltage space.
//!
//! Once loaded, every annotation lives in gate-voltage coordinates, never raw
//! pixel indices. Containment and intersection queries are delegated to the
//! `geo` crate.

use geo::{Contains, Intersects, LineString, Point, Polygon};

use crate::regime::ChargeRegime;

/// An annotated electron-transition boundary, as an ordered polyline in
/// voltage space. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionLine {
    line: LineString<f64>,
}

impl TransitionLine {
    /// Build a transition line from ordered `(x_volt, y_volt)` vertices.
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self {
            line: LineString::from(points),
        }
    }

    /// Ordered `(x_volt, y_volt)` vertices of this line.
    #[must_use]
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.line.points().map(|p| (p.x(), p.y())).collect()
    }

    /// Whether this line touches or crosses the given area.
    #[must_use]
    pub fn intersects(&self, area: &Polygon<f64>) -> bool {
        self.line.intersects(area)
    }
}

/// A polygon-bounded area labeled with an electron-count regime.
///
/// Regions may overlap; lookup precedence is list order, first match wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRegion {
    regime: ChargeRegime,
    polygon: Polygon<f64>,
}

impl ChargeRegion {
    /// Build a charge region from a regime tag and `(x_volt, y_volt)`
    /// polygon vertices. The polygon is closed implicitly.
    #[must_use]
    pub fn new(regime: ChargeRegime, points: Vec<(f64, f64)>) -> Self {
        Self {
            regime,
            polygon: Polygon::new(LineString::from(points), vec![]),
        }
    }

    /// The regime tag of this region.
    #[must_use]
    pub fn regime(&self) -> ChargeRegime {
        self.regime
    }

    /// Whether the given voltage point lies strictly inside this region.
    #[must_use]
    pub fn contains(&self, x_volt: f64, y_volt: f64) -> bool {
        self.polygon.contains(&Point::new(x_volt, y_volt))
    }
}

/// Build the axis-aligned voltage rectangle spanned by two corner points,
/// as a polygon usable in intersection queries.
#[must_use]
pub(crate) fn volt_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]),
        vec![],
    )
}
