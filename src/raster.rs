//! Line rasterization onto the density surface.
//!
//! Strokes are drawn with a soft plus-shaped splat: the target pixel
//! receives the full weighted opacity and its four direct neighbors a
//! quarter each, widening single-pixel lines into visible strokes. Two
//! rasterizers share the kernel: an anti-aliased Xiaolin Wu variant (the
//! default) and a hard-edged Bresenham variant. Neither bounds-checks;
//! the grid ignores off-canvas writes.

use crate::density::DensityGrid;

/// Line rasterization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// Anti-aliased Xiaolin Wu lines.
    #[default]
    AntiAliased,

    /// Bresenham lines at full opacity per pixel.
    Hard,
}

/// Deposit opacity at (`x`, `y`) with the plus-shaped kernel.
pub fn splat(grid: &mut DensityGrid, x: i64, y: i64, opacity: f32) {
    grid.accumulate(x, y, opacity);
    grid.accumulate(x + 1, y, opacity / 4.0);
    grid.accumulate(x - 1, y, opacity / 4.0);
    grid.accumulate(x, y + 1, opacity / 4.0);
    grid.accumulate(x, y - 1, opacity / 4.0);
}

/// Draw an anti-aliased line from (`x0`, `y0`) to (`x1`, `y1`).
///
/// Simplified Xiaolin Wu: endpoints are reordered so the major axis runs
/// left to right, then each major-axis column splats the two pixels
/// straddling the minor-axis intersection, weighted by coverage and scaled
/// by `opacity`. The last column is left to the following segment; a
/// zero-length line draws nothing.
pub fn draw_line_aa(grid: &mut DensityGrid, x0: i32, y0: i32, x1: i32, y1: i32, opacity: u8) {
    // i64 throughout so saturated garbage coordinates cannot overflow.
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);

    let steep = (x0 - x1).abs() < (y0 - y1).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx == 0 { 1.0 } else { dy as f64 / dx as f64 };
    let opacity = opacity as f64;

    // Minor-axis intersection, advanced once per column.
    let mut intery = y0 as f64;
    for x in x0..x1 {
        splat_pair(grid, steep, x, intery, opacity);
        intery += gradient;
    }
}

/// Splat the two pixels straddling the minor-axis intersection at one
/// major-axis column, transposing coordinates for steep lines.
fn splat_pair(grid: &mut DensityGrid, steep: bool, major: i64, intery: f64, opacity: f64) {
    let minor = intery as i64;
    for (m, weight) in [(minor, rfpart(intery)), (minor + 1, fpart(intery))] {
        let (x, y) = if steep { (m, major) } else { (major, m) };
        splat(grid, x, y, (weight * opacity) as f32);
    }
}

/// Draw a hard-edged Bresenham line from (`x0`, `y0`) to (`x1`, `y1`).
///
/// Every stepped pixel receives the full `opacity` through the same splat
/// kernel. Unlike the anti-aliased variant, both endpoints are drawn.
pub fn draw_line_hard(grid: &mut DensityGrid, x0: i32, y0: i32, x1: i32, y1: i32, opacity: f32) {
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);

    let steep = (x0 - x1).abs() < (y0 - y1).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let derr = (y1 - y0).abs() * 2;
    let step = if y1 > y0 { 1 } else { -1 };

    let mut err = 0;
    let mut y = y0;
    for x in x0..=x1 {
        let (px, py) = if steep { (y, x) } else { (x, y) };
        splat(grid, px, py, opacity);
        err += derr;
        if err > dx {
            y += step;
            err -= dx * 2;
        }
    }
}

fn fpart(x: f64) -> f64 {
    x - x.floor()
}

fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}
