//! Density accumulation surface and the f32 pixel codec.
//!
//! Pass 1 of a render accumulates stroke opacity into a dense `f32` grid,
//! one cell per canvas pixel. Density is never clamped and never blended;
//! overlapping strokes simply add. The grid also provides the legacy RGBA
//! byte layout, which stores each cell's IEEE-754 bit pattern little-endian
//! across the four channels.

/// A square accumulation surface, zero-initialized.
#[derive(Debug, Clone)]
pub struct DensityGrid {
    size: u32,
    cells: Vec<f32>,
}

impl DensityGrid {
    /// Create a zeroed `size` x `size` grid.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            cells: vec![0.0; (size as usize) * (size as usize)],
        }
    }

    /// Canvas edge length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Add `delta` to the cell at (`x`, `y`).
    ///
    /// Out-of-canvas coordinates are ignored. The rasterizer leans on this:
    /// it draws partially visible segments without bounds checks and the
    /// off-canvas part of the stroke simply vanishes.
    pub fn accumulate(&mut self, x: i64, y: i64, delta: f32) {
        let size = self.size as i64;
        if x < 0 || y < 0 || x >= size || y >= size {
            return;
        }
        self.cells[(y * size + x) as usize] += delta;
    }

    /// Read the cell at (`x`, `y`); out-of-canvas reads return 0.0.
    pub fn get(&self, x: i64, y: i64) -> f32 {
        let size = self.size as i64;
        if x < 0 || y < 0 || x >= size || y >= size {
            return 0.0;
        }
        self.cells[(y * size + x) as usize]
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Serialize the surface in the RGBA byte layout, each cell encoded
    /// with [`encode_density`].
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.cells.len() * 4);
        for &value in &self.cells {
            bytes.extend_from_slice(&encode_density(value));
        }
        bytes
    }
}

/// Encode a density value as four RGBA channel bytes: the IEEE-754 single
/// bit pattern, little-endian (R holds the lowest byte).
pub fn encode_density(value: f32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Decode four RGBA channel bytes back into a density value.
///
/// Inverse of [`encode_density`]: `decode_density(encode_density(v)) == v`
/// for every finite `v`.
pub fn decode_density(bytes: [u8; 4]) -> f32 {
    f32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_round_trip() {
        for value in [0.0f32, 1.0, 0.25, 100.0, 63.75, 255.0, 1e-20, 3.4e38] {
            assert_eq!(decode_density(encode_density(value)), value);
        }
    }

    #[test]
    fn test_codec_byte_order() {
        // 1.0f32 is 0x3F800000; little-endian puts the low byte in R.
        assert_eq!(encode_density(1.0), [0x00, 0x00, 0x80, 0x3f]);
        assert_eq!(decode_density([0x00, 0x00, 0x80, 0x3f]), 1.0);
    }

    #[test]
    fn test_accumulate_is_additive() {
        let mut grid = DensityGrid::new(4);
        grid.accumulate(1, 2, 0.5);
        grid.accumulate(1, 2, 0.25);
        assert_eq!(grid.get(1, 2), 0.75);
        assert_eq!(grid.get(2, 1), 0.0);
    }

    #[test]
    fn test_accumulate_ignores_out_of_canvas() {
        let mut grid = DensityGrid::new(4);
        grid.accumulate(-1, 0, 1.0);
        grid.accumulate(0, -1, 1.0);
        grid.accumulate(4, 0, 1.0);
        grid.accumulate(0, 4, 1.0);
        grid.accumulate(i64::MIN, i64::MAX, 1.0);
        assert!(grid.cells().iter().all(|&v| v == 0.0));
        assert_eq!(grid.get(-1, 0), 0.0);
    }

    #[test]
    fn test_rgba_layout() {
        let mut grid = DensityGrid::new(2);
        grid.accumulate(1, 0, 1.0);
        let bytes = grid.to_rgba_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[0x00, 0x00, 0x80, 0x3f]);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
    }
}
