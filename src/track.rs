//! Geographic tracks and encoded polyline decoding.

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// An ordered sequence of geographic points.
///
/// A track with fewer than two points carries no segments and renders
/// nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub points: Vec<GeoPoint>,
}

impl Track {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Decode a Google encoded polyline (precision 5) into a track.
    pub fn from_polyline(encoded: &str) -> Result<Self, TrackError> {
        let line = polyline::decode_polyline(encoded, 5)
            .map_err(|e| TrackError::Decode(e.to_string()))?;

        let points = line
            .0
            .into_iter()
            .map(|coord| GeoPoint {
                lat: coord.y,
                lon: coord.x,
            })
            .collect();

        Ok(Self { points })
    }
}

/// Track decoding errors.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Invalid polyline encoding: {0}")]
    Decode(String),
}
