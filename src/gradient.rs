//! Gradient tables: position-keyed color stops and density-to-color mapping.
//!
//! A gradient is a list of stops ordered by position in [0,1]. Lookup blends
//! the two bracketing stops in HCL space and linearly interpolates their
//! alphas. A JSON configuration layer (`GradientSpec`) loads and validates
//! tables from files or strings.

use std::path::Path;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::color::{blend_hcl, Color};

/// A single gradient keypoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: Color,

    /// Stop opacity in [0,1].
    pub alpha: f64,

    /// Stop position in [0,1].
    pub position: f64,
}

/// An ordered set of gradient stops.
///
/// Construction is lenient: ordering and ranges are the caller's business
/// (the JSON path validates them). Lookup relies on stops being sorted by
/// position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradientTable {
    pub stops: Vec<GradientStop>,
}

impl GradientTable {
    pub fn new(stops: Vec<GradientStop>) -> Self {
        Self { stops }
    }

    /// The classic track-density palette: translucent blue through red and
    /// yellow to white.
    pub fn classic_heat() -> Self {
        Self::new(vec![
            GradientStop {
                color: Color::new(0x00, 0x00, 0xff),
                alpha: 0.4,
                position: 0.0,
            },
            GradientStop {
                color: Color::new(0xff, 0x00, 0x00),
                alpha: 1.0,
                position: 0.33,
            },
            GradientStop {
                color: Color::new(0xff, 0xff, 0x00),
                alpha: 1.0,
                position: 0.66,
            },
            GradientStop {
                color: Color::new(0xff, 0xff, 0xff),
                alpha: 1.0,
                position: 1.0,
            },
        ])
    }

    /// Map a density value to an RGBA color.
    ///
    /// Scans for the first adjacent stop pair bracketing `t`, blends their
    /// colors in HCL space and lerps their alphas. When no pair brackets `t`
    /// (because it lies outside the stop range or the table has fewer than
    /// two stops) the last stop's raw color is returned fully opaque,
    /// ignoring its alpha. An empty table maps everything to transparent
    /// black.
    pub fn color_at(&self, t: f64) -> Rgba<u8> {
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if lo.position <= t && t <= hi.position {
                let u = (t - lo.position) / (hi.position - lo.position);
                let alpha = (1.0 - u) * lo.alpha + u * hi.alpha;
                let c = blend_hcl(lo.color, hi.color, u);
                return Rgba([c.r, c.g, c.b, (alpha * 255.0) as u8]);
            }
        }

        match self.stops.last() {
            Some(stop) => Rgba([stop.color.r, stop.color.g, stop.color.b, 255]),
            None => Rgba([0, 0, 0, 0]),
        }
    }
}

/// JSON configuration for a gradient table.
///
/// ```json
/// {
///   "stops": [
///     { "position": 0.0, "color": "#0000FF", "alpha": 0.4 },
///     { "position": 1.0, "color": "#FFFFFF" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientSpec {
    pub stops: Vec<StopSpec>,
}

/// One stop in a gradient configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopSpec {
    /// Position in [0,1].
    pub position: f64,

    /// "#RRGGBB" color.
    pub color: String,

    /// Opacity in [0,1].
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl GradientSpec {
    /// Load a gradient configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GradientConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GradientConfigError::IoError(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Parse a gradient configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GradientConfigError> {
        serde_json::from_str(json).map_err(|e| GradientConfigError::ParseError(e.to_string()))
    }

    /// Validate stop count, ranges and ordering.
    pub fn validate(&self) -> Result<(), GradientConfigError> {
        if self.stops.len() < 2 {
            return Err(GradientConfigError::ValidationError(
                "Gradient must have at least 2 stops".to_string(),
            ));
        }

        for stop in &self.stops {
            if !(0.0..=1.0).contains(&stop.position) {
                return Err(GradientConfigError::ValidationError(format!(
                    "Stop position {} out of range [0,1]",
                    stop.position
                )));
            }
            if !(0.0..=1.0).contains(&stop.alpha) {
                return Err(GradientConfigError::ValidationError(format!(
                    "Stop alpha {} out of range [0,1]",
                    stop.alpha
                )));
            }
        }

        for i in 1..self.stops.len() {
            if self.stops[i].position <= self.stops[i - 1].position {
                return Err(GradientConfigError::ValidationError(
                    "Stop positions must be in ascending order".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Validate and build the lookup table.
    ///
    /// A stop with an unparseable color fails the whole build; a partially
    /// built table is never returned.
    pub fn build(&self) -> Result<GradientTable, GradientConfigError> {
        self.validate()?;

        let mut stops = Vec::with_capacity(self.stops.len());
        for spec in &self.stops {
            let color = Color::from_hex(&spec.color).map_err(|e| {
                GradientConfigError::ValidationError(format!("Stop at {}: {}", spec.position, e))
            })?;
            stops.push(GradientStop {
                color,
                alpha: spec.alpha,
                position: spec.position,
            });
        }

        Ok(GradientTable::new(stops))
    }
}

/// Gradient configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum GradientConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
