//! Two-pass heatmap rendering: accumulate track strokes, then colorize.

use image::{ImageBuffer, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::bbox::GeoBounds;
use crate::density::DensityGrid;
use crate::gradient::GradientTable;
use crate::projection::to_canvas;
use crate::raster::{draw_line_aa, draw_line_hard, LineStyle};
use crate::track::Track;

/// A rendered heatmap: the RGBA canvas plus a render summary.
#[derive(Debug)]
pub struct Heatmap {
    pub image: RgbaImage,
    pub stats: RenderStats,
}

/// Summary of one render.
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Tracks with at least two points that entered rasterization. Their
    /// segments may still all be elided or off canvas; only
    /// `segments_drawn` says whether pixels were touched.
    pub tracks_processed: usize,

    /// Segments actually rasterized (visible and non-duplicate).
    pub segments_drawn: usize,

    /// Tracks dropped because their polyline failed to decode.
    pub skipped: Vec<TrackSkip>,
}

/// A track dropped during decoding.
#[derive(Debug, Clone)]
pub struct TrackSkip {
    pub index: usize,
    pub reason: String,
}

/// Track density renderer for a fixed window, canvas size and gradient.
#[derive(Debug, Clone)]
pub struct Renderer {
    gradient: GradientTable,
    bounds: GeoBounds,
    size: u32,
    opacity: u8,
    line_style: LineStyle,
}

impl Renderer {
    /// Create a renderer drawing strokes at `opacity` onto a
    /// `size` x `size` canvas spanning `bounds`.
    pub fn new(gradient: GradientTable, bounds: GeoBounds, size: u32, opacity: u8) -> Self {
        Self {
            gradient,
            bounds,
            size,
            opacity,
            line_style: LineStyle::default(),
        }
    }

    /// Select the line rasterization mode (anti-aliased by default).
    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    /// Render a set of encoded polylines.
    ///
    /// Undecodable tracks are skipped, logged and reported in the result
    /// stats; they never abort the render. An empty input returns a fully
    /// transparent canvas without touching the rasterization pipeline.
    pub fn render<S: AsRef<str>>(&self, polylines: &[S]) -> Heatmap {
        if polylines.is_empty() {
            return Heatmap {
                image: transparent_canvas(self.size),
                stats: RenderStats::default(),
            };
        }

        let mut tracks = Vec::with_capacity(polylines.len());
        let mut skipped = Vec::new();
        for (index, encoded) in polylines.iter().enumerate() {
            match Track::from_polyline(encoded.as_ref()) {
                Ok(track) => tracks.push(track),
                Err(e) => {
                    tracing::warn!(track = index, error = %e, "Skipping undecodable track");
                    skipped.push(TrackSkip {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut heatmap = self.render_tracks(&tracks);
        heatmap.stats.skipped = skipped;
        heatmap
    }

    /// Render already-decoded tracks.
    ///
    /// Pass 1 projects each track and rasterizes its segments onto a
    /// density grid: consecutive points that project to the same pixel are
    /// elided, and a segment is drawn only when at least one endpoint is
    /// strictly inside the canvas interior. Pass 2 maps density through
    /// the gradient at `density / 255`; pixels no stroke touched stay
    /// transparent black.
    pub fn render_tracks(&self, tracks: &[Track]) -> Heatmap {
        let mut stats = RenderStats::default();
        if tracks.is_empty() {
            return Heatmap {
                image: transparent_canvas(self.size),
                stats,
            };
        }

        let mut grid = DensityGrid::new(self.size);
        for track in tracks {
            if track.points.len() < 2 {
                continue;
            }
            stats.tracks_processed += 1;

            let first = track.points[0];
            let (mut prev_x, mut prev_y) =
                to_canvas(self.size, &self.bounds, first.lat, first.lon);
            for point in &track.points {
                let (x, y) = to_canvas(self.size, &self.bounds, point.lat, point.lon);
                if x == prev_x && y == prev_y {
                    continue;
                }
                if self.in_interior(prev_x, prev_y) || self.in_interior(x, y) {
                    match self.line_style {
                        LineStyle::AntiAliased => {
                            draw_line_aa(&mut grid, prev_x, prev_y, x, y, self.opacity)
                        }
                        LineStyle::Hard => {
                            draw_line_hard(&mut grid, prev_x, prev_y, x, y, self.opacity as f32)
                        }
                    }
                    stats.segments_drawn += 1;
                }
                prev_x = x;
                prev_y = y;
            }
        }

        let image = self.colorize(&grid);

        tracing::debug!(
            size = self.size,
            tracks = stats.tracks_processed,
            segments = stats.segments_drawn,
            "Rendered heatmap"
        );

        Heatmap { image, stats }
    }

    /// Strictly inside the canvas interior; the border rows and columns
    /// count as outside.
    fn in_interior(&self, x: i32, y: i32) -> bool {
        let size = self.size as i32;
        x > 0 && x < size && y > 0 && y < size
    }

    /// Pass 2: map accumulated density to colors, row-parallel.
    fn colorize(&self, grid: &DensityGrid) -> RgbaImage {
        let size = self.size as usize;
        let mut image = transparent_canvas(self.size);
        if size == 0 {
            return image;
        }

        let buf: &mut [u8] = &mut image;
        buf.par_chunks_mut(size * 4)
            .zip(grid.cells().par_chunks(size))
            .for_each(|(row, densities)| {
                for (x, &density) in densities.iter().enumerate() {
                    if density > 0.0 {
                        let color = self.gradient.color_at((density / 255.0) as f64);
                        row[x * 4..x * 4 + 4].copy_from_slice(&color.0);
                    }
                }
            });

        image
    }
}

fn transparent_canvas(size: u32) -> RgbaImage {
    ImageBuffer::from_pixel(size, size, Rgba([0, 0, 0, 0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_excludes_border_rows_and_columns() {
        let renderer = Renderer::new(
            GradientTable::classic_heat(),
            GeoBounds::new(1.0, 0.0, 1.0, 0.0),
            256,
            128,
        );
        assert!(renderer.in_interior(1, 1));
        assert!(renderer.in_interior(255, 255));
        assert!(!renderer.in_interior(0, 128));
        assert!(!renderer.in_interior(128, 0));
        assert!(!renderer.in_interior(256, 128));
        assert!(!renderer.in_interior(128, 256));
    }
}
