//! Density heatmap rendering for geographic tracks.
//!
//! Tracks (polylines of lat/long points) are projected onto a square pixel
//! canvas and drawn as anti-aliased lines onto a floating point
//! accumulation surface, where overlapping strokes add up. The accumulated
//! density is then mapped through a perceptual (HCL) color gradient to
//! produce an RGBA image, with hot opaque colors where many tracks overlap
//! and full transparency where none pass.

pub mod bbox;
pub mod color;
pub mod density;
pub mod gradient;
pub mod projection;
pub mod raster;
pub mod render;
pub mod track;

pub use bbox::{BoundsParseError, GeoBounds};
pub use color::{Color, ColorParseError};
pub use density::{decode_density, encode_density, DensityGrid};
pub use gradient::{GradientConfigError, GradientSpec, GradientStop, GradientTable, StopSpec};
pub use raster::LineStyle;
pub use render::{Heatmap, RenderStats, Renderer, TrackSkip};
pub use track::{GeoPoint, Track, TrackError};
