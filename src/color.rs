//! Color parsing and perceptual (HCL) blending for gradient interpolation.
//!
//! Gradient blending runs sRGB -> linear RGB -> XYZ (D65) -> L*a*b* -> LCh
//! and back, interpolating hue along the shortest arc. Out-of-gamut results
//! are clamped per channel before conversion back to 8-bit.

/// An opaque RGB color. Alpha lives on the gradient stop, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// D65 reference white in XYZ.
const D65: [f64; 3] = [0.95047, 1.0, 1.08883];

/// CIE L*a*b* transfer threshold, 6/29.
const LAB_DELTA: f64 = 6.0 / 29.0;

/// Chroma below this is treated as hueless gray when blending.
const HUELESS_CHROMA: f64 = 0.00015;

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a "#RRGGBB" hex string (leading '#' optional).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorParseError::InvalidFormat(s.to_string()));
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?;

        Ok(Self { r, g, b })
    }

    /// CIE L*a*b* coordinates (D65 white, L scaled to [0,1]).
    pub fn lab(&self) -> (f64, f64, f64) {
        let (x, y, z) = self.xyz();
        let fx = lab_f(x / D65[0]);
        let fy = lab_f(y / D65[1]);
        let fz = lab_f(z / D65[2]);
        (1.16 * fy - 0.16, 5.0 * (fx - fy), 2.0 * (fy - fz))
    }

    /// Cylindrical L*a*b*: hue in degrees [0,360), chroma, luminance.
    ///
    /// Near-gray colors have no meaningful hue angle and report 0.
    pub fn hcl(&self) -> (f64, f64, f64) {
        let (l, a, b) = self.lab();
        let h = if (b - a).abs() > 1e-4 && a.abs() > 1e-4 {
            (b.atan2(a).to_degrees() + 360.0) % 360.0
        } else {
            0.0
        };
        let c = (a * a + b * b).sqrt();
        (h, c, l)
    }

    fn xyz(&self) -> (f64, f64, f64) {
        let r = linearize(self.r as f64 / 255.0);
        let g = linearize(self.g as f64 / 255.0);
        let b = linearize(self.b as f64 / 255.0);
        (
            0.4124564 * r + 0.3575761 * g + 0.1804375 * b,
            0.2126729 * r + 0.7151522 * g + 0.0721750 * b,
            0.0193339 * r + 0.1191920 * g + 0.9503041 * b,
        )
    }
}

/// Blend two colors in HCL space.
///
/// Hue follows the shortest arc; chroma and luminance interpolate linearly.
/// When one endpoint is gray (no chroma) its hue is undefined, so the other
/// endpoint's hue is used for the whole blend. The result is clamped into
/// the sRGB gamut channel by channel.
pub fn blend_hcl(start: Color, end: Color, t: f64) -> Color {
    let (h1, c1, l1) = start.hcl();
    let (h2, c2, l2) = end.hcl();

    let (h1, h2) = if c1 <= HUELESS_CHROMA && c2 >= HUELESS_CHROMA {
        (h2, h2)
    } else if c2 <= HUELESS_CHROMA && c1 >= HUELESS_CHROMA {
        (h1, h1)
    } else {
        (h1, h2)
    };

    from_hcl(
        interp_angle(h1, h2, t),
        c1 + t * (c2 - c1),
        l1 + t * (l2 - l1),
    )
}

/// Shortest-arc angle interpolation in degrees, wrapping at 360.
fn interp_angle(a0: f64, a1: f64, t: f64) -> f64 {
    let delta = ((a1 - a0) % 360.0 + 540.0) % 360.0 - 180.0;
    (a0 + t * delta + 360.0) % 360.0
}

fn from_hcl(h: f64, c: f64, l: f64) -> Color {
    let rad = h.to_radians();
    let (x, y, z) = lab_to_xyz(l, c * rad.cos(), c * rad.sin());
    let (lr, lg, lb) = (
        3.2404542 * x - 1.5371385 * y - 0.4985314 * z,
        -0.9692660 * x + 1.8760108 * y + 0.0415560 * z,
        0.0556434 * x - 0.2040259 * y + 1.0572252 * z,
    );
    Color {
        r: quantize(delinearize(lr).clamp(0.0, 1.0)),
        g: quantize(delinearize(lg).clamp(0.0, 1.0)),
        b: quantize(delinearize(lb).clamp(0.0, 1.0)),
    }
}

fn lab_to_xyz(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let fy = (l + 0.16) / 1.16;
    let fx = a / 5.0 + fy;
    let fz = fy - b / 2.0;
    (
        D65[0] * lab_finv(fx),
        D65[1] * lab_finv(fy),
        D65[2] * lab_finv(fz),
    )
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_DELTA * LAB_DELTA * LAB_DELTA {
        t.cbrt()
    } else {
        t / (3.0 * LAB_DELTA * LAB_DELTA) + 4.0 / 29.0
    }
}

fn lab_finv(t: f64) -> f64 {
    if t > LAB_DELTA {
        t * t * t
    } else {
        3.0 * LAB_DELTA * LAB_DELTA * (t - 4.0 / 29.0)
    }
}

/// sRGB transfer function, gamma-compressed to linear.
fn linearize(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear to gamma-compressed sRGB.
fn delinearize(v: f64) -> f64 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// [0,1] channel to 8 bits through the 16-bit intermediate.
fn quantize(v: f64) -> u8 {
    (((v * 65535.0 + 0.5) as u32) >> 8) as u8
}

/// Color parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum ColorParseError {
    #[error("Invalid color format: {0}. Expected '#RRGGBB'")]
    InvalidFormat(String),

    #[error("Invalid hex digit in color: {0}")]
    InvalidDigit(String),
}
