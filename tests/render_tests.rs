//! End-to-end tests for the heatmap rendering pipeline.

use image::RgbaImage;
use track_heatmap::{GeoBounds, GeoPoint, GradientTable, LineStyle, Renderer, Track};

/// Two-degree window over the test area, 256 px canvas.
fn bounds() -> GeoBounds {
    GeoBounds::new(36.0, 34.0, 12.0, 10.0)
}

fn renderer(opacity: u8) -> Renderer {
    Renderer::new(GradientTable::classic_heat(), bounds(), 256, opacity)
}

fn track(points: &[(f64, f64)]) -> Track {
    Track::new(
        points
            .iter()
            .map(|&(lat, lon)| GeoPoint { lat, lon })
            .collect(),
    )
}

fn is_fully_transparent(image: &RgbaImage) -> bool {
    image.pixels().all(|p| p.0 == [0, 0, 0, 0])
}

// ============================================================================
// Empty and degenerate inputs
// ============================================================================

#[test]
fn test_no_tracks_renders_transparent_canvas() {
    let heatmap = renderer(128).render::<&str>(&[]);

    assert_eq!(heatmap.image.dimensions(), (256, 256));
    assert!(is_fully_transparent(&heatmap.image));
    assert_eq!(heatmap.stats.tracks_processed, 0);
    assert_eq!(heatmap.stats.segments_drawn, 0);
    assert!(heatmap.stats.skipped.is_empty());
}

#[test]
fn test_track_collapsing_to_one_pixel_draws_nothing() {
    // Both points project to the same canvas pixel, so there is no
    // segment to draw.
    let tracks = vec![track(&[(35.0, 11.0), (35.0, 11.0)])];
    let heatmap = renderer(128).render_tracks(&tracks);

    assert!(is_fully_transparent(&heatmap.image));
    assert_eq!(heatmap.stats.tracks_processed, 1);
    assert_eq!(heatmap.stats.segments_drawn, 0);
}

#[test]
fn test_track_outside_window_draws_nothing() {
    let tracks = vec![track(&[(50.0, 50.0), (51.0, 51.0)])];
    let heatmap = renderer(128).render_tracks(&tracks);

    assert!(is_fully_transparent(&heatmap.image));
    assert_eq!(heatmap.stats.tracks_processed, 1);
    assert_eq!(heatmap.stats.segments_drawn, 0);
}

#[test]
fn test_zero_size_canvas_does_not_panic() {
    let r = Renderer::new(GradientTable::classic_heat(), bounds(), 0, 128);
    let heatmap = r.render_tracks(&[track(&[(35.0, 10.5), (35.0, 11.5)])]);
    assert_eq!(heatmap.image.dimensions(), (0, 0));
}

// ============================================================================
// Visible strokes
// ============================================================================

#[test]
fn test_diagonal_track_renders_stroke() {
    let tracks = vec![track(&[(34.2, 10.2), (35.8, 11.8)])];
    let heatmap = renderer(128).render_tracks(&tracks);

    assert_eq!(heatmap.stats.tracks_processed, 1);
    assert_eq!(heatmap.stats.segments_drawn, 1);
    assert!(heatmap.image.pixels().any(|p| p.0[3] > 0));
    // Pixels away from the stroke stay transparent.
    assert_eq!(heatmap.image.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn test_stroke_alpha_follows_opacity() {
    // A horizontal track along lat 35 lands on canvas row 129 spanning
    // columns 26..231. An interior stroke pixel accumulates the full
    // opacity plus two quarter arms, 1.5x in total.
    let tracks = vec![track(&[(35.0, 10.2), (35.0, 11.8)])];

    // Opacity 128: density 192, past the last gradient stop interval
    // boundary at 0.66, alpha 255.
    let strong = renderer(128).render_tracks(&tracks);
    assert_eq!(strong.image.get_pixel(100, 129).0[3], 255);

    // Opacity 20: density 30, interpolated in the first interval.
    let faint = renderer(20).render_tracks(&tracks);
    assert_eq!(faint.image.get_pixel(100, 129).0[3], 156);
}

#[test]
fn test_hard_style_draws_final_column() {
    let tracks = vec![track(&[(35.0, 10.2), (35.0, 11.8)])];

    // The anti-aliased stroke leaves the last column to a following
    // segment, so only a kernel arm lands there.
    let aa = renderer(128).render_tracks(&tracks);
    assert!(aa.image.get_pixel(231, 129).0[3] < 255);

    let hard = renderer(128)
        .with_line_style(LineStyle::Hard)
        .render_tracks(&tracks);
    assert_eq!(hard.image.get_pixel(231, 129).0[3], 255);
}

// ============================================================================
// Polyline decoding
// ============================================================================

#[test]
fn test_undecodable_track_is_skipped() {
    let heatmap = renderer(128).render(&["!!!"]);

    assert!(is_fully_transparent(&heatmap.image));
    assert_eq!(heatmap.stats.tracks_processed, 0);
    assert_eq!(heatmap.stats.skipped.len(), 1);
    assert_eq!(heatmap.stats.skipped[0].index, 0);
    assert!(!heatmap.stats.skipped[0].reason.is_empty());
}

#[test]
fn test_valid_tracks_render_alongside_skipped_ones() {
    let polylines = ["!!!", "_p~iF~ps|U_ulLnnqC_mqNvxq`@"];
    let window = GeoBounds::new(44.0, 38.0, -119.0, -127.0);
    let r = Renderer::new(GradientTable::classic_heat(), window, 256, 128);
    let heatmap = r.render(&polylines);

    assert_eq!(heatmap.stats.skipped.len(), 1);
    assert_eq!(heatmap.stats.skipped[0].index, 0);
    assert_eq!(heatmap.stats.tracks_processed, 1);
    assert_eq!(heatmap.stats.segments_drawn, 2);
    assert!(heatmap.image.pixels().any(|p| p.0[3] > 0));
}
