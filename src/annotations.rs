//! Conversion of raw annotation records into volt-space geometry.
//!
//! Raw records carry pixel coordinates from the labeling tool; everything
//! this crate queries lives in voltage space. Both loaders map X plainly and
//! Y with the axis inverted (image origin is top-left), snapping points near
//! the image border onto it.

use crate::coords::coord_to_volt;
use crate::geometry::{ChargeRegion, TransitionLine};
use crate::labels::{AnnotationObject, PixelPoint};
use crate::regime::ChargeRegime;

fn map_points(
    points: &[PixelPoint],
    x_axis: &[f64],
    y_axis: &[f64],
    pixel_size: f64,
    snap: f64,
) -> Vec<(f64, f64)> {
    let (x_min, x_max) = (x_axis[0], x_axis[x_axis.len() - 1]);
    let (y_min, y_max) = (y_axis[0], y_axis[y_axis.len() - 1]);

    let xs = coord_to_volt(
        points.iter().map(|p| p.x),
        x_min,
        x_max,
        pixel_size,
        snap,
        false,
    );
    let ys = coord_to_volt(
        points.iter().map(|p| p.y),
        y_min,
        y_max,
        pixel_size,
        snap,
        true,
    );

    xs.into_iter().zip(ys).collect()
}

/// Build transition lines from raw line records.
///
/// Records without line geometry are skipped; output order matches input
/// order and each polyline keeps its original point order.
#[must_use]
pub fn load_lines<'a>(
    records: impl IntoIterator<Item = &'a AnnotationObject>,
    x_axis: &[f64],
    y_axis: &[f64],
    pixel_size: f64,
    snap: f64,
) -> Vec<TransitionLine> {
    records
        .into_iter()
        .filter_map(|record| record.line.as_deref())
        .map(|points| TransitionLine::new(map_points(points, x_axis, y_axis, pixel_size, snap)))
        .collect()
}

/// Build charge regions from raw area records.
///
/// The record name is parsed into a [`ChargeRegime`]; unrecognized names map
/// to [`ChargeRegime::Unknown`]. Output order matches input order, which
/// fixes first-match precedence for containment lookups.
#[must_use]
pub fn load_charge_regions<'a>(
    records: impl IntoIterator<Item = &'a AnnotationObject>,
    x_axis: &[f64],
    y_axis: &[f64],
    pixel_size: f64,
    snap: f64,
) -> Vec<ChargeRegion> {
    records
        .into_iter()
        .filter_map(|record| {
            record.polygon.as_deref().map(|points| {
                ChargeRegion::new(
                    ChargeRegime::from_label(&record.name),
                    map_points(points, x_axis, y_axis, pixel_size, snap),
                )
            })
        })
        .collect()
}
