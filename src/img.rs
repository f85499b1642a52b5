use crate::error::{Error, Result};

/// A single channel raster, row-major. Samples are widened to `u32` in memory;
/// the stored width is picked per read/write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(Error::PayloadLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(RasterImage {
            width,
            height,
            pixels,
        })
    }

    /// Builds an image from a grid. Every row must have the same length.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut pixels = Vec::with_capacity(width * rows.len());
        for (row, samples) in rows.iter().enumerate() {
            let samples = samples.as_ref();
            if samples.len() != width {
                return Err(Error::RaggedRows {
                    row,
                    expected: width,
                    actual: samples.len(),
                });
            }
            pixels.extend_from_slice(samples);
        }
        let width = u32::try_from(width).map_err(|_| Error::DimensionsTooLarge)?;
        let height = u32::try_from(rows.len()).map_err(|_| Error::DimensionsTooLarge)?;
        RasterImage::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.pixels[start..start + w])
    }

    /// Always `height` rows, even when they are zero samples wide.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        let w = self.width as usize;
        (0..self.height as usize).map(move |y| &self.pixels[y * w..(y + 1) * w])
    }

    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    pub fn min_max(&self) -> Option<(u32, u32)> {
        let min = *self.pixels.iter().min()?;
        let max = *self.pixels.iter().max()?;
        Some((min, max))
    }

    /// Stretches samples from min..max onto 0..=255. A flat image maps to 0.
    pub fn to_gray8(&self) -> Vec<u8> {
        let Some((min, max)) = self.min_max() else {
            return vec![];
        };
        let span = (max - min) as u64;
        self.pixels
            .iter()
            .map(|&p| {
                if span == 0 {
                    0
                } else {
                    ((p - min) as u64 * 255 / span) as u8
                }
            })
            .collect()
    }

    pub fn to_rgba(&self) -> Vec<u8> {
        self.to_gray8()
            .into_iter()
            .flat_map(|g| [g, g, g, 255])
            .collect()
    }
}

pub fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::DimensionsTooLarge)
}
