use crate::error::{Error, Result};
use crate::img::RasterImage;

/// Integer scale factor. `n > 0` repeats every sample `n` times, `-n` keeps
/// every `n`-th sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFactor(i32);

impl ScaleFactor {
    pub const MAX: i32 = 4;

    pub fn new(factor: i32) -> Result<Self> {
        if factor == 0 || factor.abs() > Self::MAX {
            return Err(Error::InvalidScale(factor));
        }
        Ok(ScaleFactor(factor))
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn apply(self, len: u32) -> Result<u32> {
        if self.0 > 0 {
            len.checked_mul(self.0 as u32)
                .ok_or(Error::DimensionsTooLarge)
        } else {
            Ok(len / self.0.unsigned_abs())
        }
    }

    /// Maps a destination index back onto the source.
    fn source_index(self, i: u32) -> u32 {
        if self.0 > 0 {
            i / self.0 as u32
        } else {
            i * self.0.unsigned_abs()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn full(image: &RasterImage) -> Self {
        Region {
            x: 0,
            y: 0,
            width: image.width(),
            height: image.height(),
        }
    }

    pub fn validate(&self, image: &RasterImage) -> Result<()> {
        if self.x >= image.width() || self.y >= image.height() {
            return Err(Error::InvalidRegion(format!(
                "start point ({}, {}) outside {}x{} image",
                self.x,
                self.y,
                image.width(),
                image.height()
            )));
        }
        let ex = self.x as u64 + self.width as u64;
        let ey = self.y as u64 + self.height as u64;
        if self.width == 0
            || self.height == 0
            || ex > image.width() as u64
            || ey > image.height() as u64
        {
            return Err(Error::InvalidRegion(format!(
                "end point ({}, {}) outside {}x{} image",
                ex,
                ey,
                image.width(),
                image.height()
            )));
        }
        Ok(())
    }
}

/// Nearest-neighbour scale of `region` by independent x and y factors.
pub fn scale(
    image: &RasterImage,
    region: Region,
    x_scale: ScaleFactor,
    y_scale: ScaleFactor,
) -> Result<RasterImage> {
    region.validate(image)?;
    let width = x_scale.apply(region.width)?;
    let height = y_scale.apply(region.height)?;

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for dy in 0..height {
        let sy = region.y + y_scale.source_index(dy);
        for dx in 0..width {
            let sx = region.x + x_scale.source_index(dx);
            pixels.push(image.get(sx, sy).ok_or_else(|| {
                Error::InvalidRegion(format!("({}, {}) out of bounds", sx, sy))
            })?);
        }
    }
    RasterImage::new(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: u32, h: u32) -> RasterImage {
        RasterImage::new(w, h, (0..w * h).collect()).unwrap()
    }

    #[test]
    fn factor_bounds() {
        for f in [-4, -3, -2, -1, 1, 2, 3, 4] {
            assert_eq!(ScaleFactor::new(f).unwrap().get(), f);
        }
        for f in [0, 5, -5, 100] {
            assert!(matches!(ScaleFactor::new(f), Err(Error::InvalidScale(_))));
        }
    }

    #[test]
    fn upscaled_size_must_fit_u32() {
        let four = ScaleFactor::new(4).unwrap();
        assert_eq!(four.apply(1000).unwrap(), 4000);
        assert!(matches!(
            four.apply(u32::MAX / 4 + 1),
            Err(Error::DimensionsTooLarge)
        ));
        assert_eq!(ScaleFactor::new(-4).unwrap().apply(u32::MAX).unwrap(), u32::MAX / 4);
    }

    #[test]
    fn upscale_repeats_samples() {
        let img = RasterImage::from_rows(&[[1u32, 2], [3, 4]]).unwrap();
        let out = scale(
            &img,
            Region::full(&img),
            ScaleFactor::new(2).unwrap(),
            ScaleFactor::new(1).unwrap(),
        )
        .unwrap();
        assert_eq!(out.to_rows(), vec![vec![1, 1, 2, 2], vec![3, 3, 4, 4]]);

        let out = scale(
            &img,
            Region::full(&img),
            ScaleFactor::new(1).unwrap(),
            ScaleFactor::new(3).unwrap(),
        )
        .unwrap();
        assert_eq!(out.height(), 6);
        assert_eq!(out.row(2), Some(&[1, 2][..]));
        assert_eq!(out.row(3), Some(&[3, 4][..]));
    }

    #[test]
    fn downscale_keeps_every_nth() {
        let img = ramp(5, 4);
        let out = scale(
            &img,
            Region::full(&img),
            ScaleFactor::new(-2).unwrap(),
            ScaleFactor::new(-2).unwrap(),
        )
        .unwrap();
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.to_rows(), vec![vec![0, 2], vec![10, 12]]);
    }

    #[test]
    fn region_is_offset() {
        let img = ramp(4, 4);
        let region = Region {
            x: 1,
            y: 2,
            width: 2,
            height: 2,
        };
        let one = ScaleFactor::new(1).unwrap();
        let out = scale(&img, region, one, one).unwrap();
        assert_eq!(out.to_rows(), vec![vec![9, 10], vec![13, 14]]);
    }

    #[test]
    fn region_must_fit() {
        let img = ramp(4, 4);
        let one = ScaleFactor::new(1).unwrap();
        let bad = [
            Region { x: 4, y: 0, width: 1, height: 1 },
            Region { x: 0, y: 0, width: 5, height: 1 },
            Region { x: 2, y: 2, width: 2, height: 3 },
            Region { x: 0, y: 0, width: 0, height: 2 },
        ];
        for region in bad {
            assert!(matches!(
                scale(&img, region, one, one),
                Err(Error::InvalidRegion(_))
            ));
        }
    }

    #[test]
    fn downscale_can_produce_empty_image() {
        let img = ramp(3, 3);
        let out = scale(
            &img,
            Region::full(&img),
            ScaleFactor::new(-4).unwrap(),
            ScaleFactor::new(1).unwrap(),
        )
        .unwrap();
        assert_eq!((out.width(), out.height()), (0, 3));
        assert!(out.is_empty());
    }
}
