//! Geographic bounding box for the render window.

use serde::{Deserialize, Serialize};

/// A geographic window in degrees (EPSG:4326).
///
/// `north > south` and `east > west` are expected but not validated;
/// a degenerate window produces garbage pixel coordinates downstream,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Create a new bounding box from edge coordinates.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Parse a bounds parameter string: "north,south,east,west"
    pub fn from_param_string(s: &str) -> Result<Self, BoundsParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(BoundsParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self {
            north: parts[0]
                .parse()
                .map_err(|_| BoundsParseError::InvalidNumber(parts[0].to_string()))?,
            south: parts[1]
                .parse()
                .map_err(|_| BoundsParseError::InvalidNumber(parts[1].to_string()))?,
            east: parts[2]
                .parse()
                .map_err(|_| BoundsParseError::InvalidNumber(parts[2].to_string()))?,
            west: parts[3]
                .parse()
                .map_err(|_| BoundsParseError::InvalidNumber(parts[3].to_string()))?,
        })
    }

    /// Longitude span of the window in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Latitude span of the window in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Check if a geographic point lies within this window.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoundsParseError {
    #[error("Invalid bounds format: {0}. Expected 'north,south,east,west'")]
    InvalidFormat(String),

    #[error("Invalid number in bounds: {0}")]
    InvalidNumber(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        let bounds = GeoBounds::from_param_string("50.0,24.0,-66.0,-125.0").unwrap();
        assert_eq!(bounds.north, 50.0);
        assert_eq!(bounds.south, 24.0);
        assert_eq!(bounds.east, -66.0);
        assert_eq!(bounds.west, -125.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(GeoBounds::from_param_string("50.0,24.0,-66.0").is_err());
        assert!(GeoBounds::from_param_string("50.0,24.0,-66.0,abc").is_err());
    }

    #[test]
    fn test_spans_and_contains() {
        let bounds = GeoBounds::new(36.0, 34.0, 12.0, 10.0);
        assert_eq!(bounds.height(), 2.0);
        assert_eq!(bounds.width(), 2.0);
        assert!(bounds.contains(35.0, 11.0));
        assert!(!bounds.contains(33.0, 11.0));
        assert!(!bounds.contains(35.0, 13.0));
    }
}
