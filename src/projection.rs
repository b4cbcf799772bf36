//! Linear geographic-to-canvas projection.

use crate::bbox::GeoBounds;

/// Project a geographic point onto a square canvas of `size` pixels.
///
/// Longitude maps linearly west-to-east onto x, latitude south-to-north
/// onto y with y inverted (row 0 is the north edge). Both axes carry a
/// half-pixel offset and round half away from zero.
///
/// There is no clamping: points outside `bounds` land outside the canvas,
/// which downstream writes ignore. Degenerate bounds (zero-width or
/// zero-height windows) produce garbage coordinates, not an error.
pub fn to_canvas(size: u32, bounds: &GeoBounds, lat: f64, lon: f64) -> (i32, i32) {
    let size = size as f64;
    let x = ((lon - bounds.west) / (bounds.east - bounds.west) * size + 0.5).round();
    let y = (size - (lat - bounds.south) / (bounds.north - bounds.south) * size + 0.5).round();
    (x as i32, y as i32)
}
