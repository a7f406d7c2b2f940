//! Pixel-to-voltage coordinate mapping.
//!
//! Annotation labels are expressed in image pixel space, while diagram
//! queries work in gate-voltage space. This module holds the one conversion
//! used everywhere: a linear pixel-to-volt transform with optional axis
//! inversion and border snapping.

/// Convert label-space pixel coordinates into voltages along one axis.
///
/// Each pixel `p` maps to `p * pixel_size + min_volt`, or to
/// `max_volt - p * pixel_size` when `invert` is set (the Y axis of image
/// labels grows downward while the voltage axis grows upward).
///
/// Converted values within `snap_margin_px` pixels of either axis extreme are
/// clamped exactly to that extreme, absorbing sub-pixel annotation jitter at
/// the image borders. With `snap_margin_px == 0` the transform is the plain
/// linear formula.
#[must_use]
pub fn coord_to_volt(
    pixels: impl IntoIterator<Item = f64>,
    min_volt: f64,
    max_volt: f64,
    pixel_size: f64,
    snap_margin_px: f64,
    invert: bool,
) -> Vec<f64> {
    let snap_margin = snap_margin_px * pixel_size;

    pixels
        .into_iter()
        .map(|p| {
            let volt = if invert {
                max_volt - p * pixel_size
            } else {
                p * pixel_size + min_volt
            };

            if volt < min_volt + snap_margin {
                min_volt
            } else if volt > max_volt - snap_margin {
                max_volt
            } else {
                volt
            }
        })
        .collect()
}
