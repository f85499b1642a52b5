use crate::error::{Error, Result};
use crate::img::RasterImage;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Pgm,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pgm => "pgm",
        }
    }

    pub fn encode(self, image: &RasterImage) -> Result<Vec<u8>> {
        match self {
            ExportFormat::Png => to_png(image),
            ExportFormat::Pgm => to_pgm(image),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "pgm" => Ok(ExportFormat::Pgm),
            _ => Err(format!("Unsupported output format {:?}, use png or pgm", s)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 8-bit greyscale PNG, samples stretched over the image's own range.
pub fn to_png(image: &RasterImage) -> Result<Vec<u8>> {
    if image.is_empty() {
        return Err(Error::EmptyImage);
    }
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.to_gray8())?;
        writer.finish()?;
    }
    Ok(out)
}

/// Binary (P5) PGM with the same normalisation as `to_png`.
pub fn to_pgm(image: &RasterImage) -> Result<Vec<u8>> {
    if image.is_empty() {
        return Err(Error::EmptyImage);
    }
    let mut out = format!("P5\n{} {}\n255\n", image.width(), image.height()).into_bytes();
    out.extend_from_slice(&image.to_gray8());
    Ok(out)
}
