use crate::error::{Error, Result};
use crate::img::{RasterImage, pixel_count};
use log::debug;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

pub const HEADER_LEN: usize = 8;

/// Bits per stored sample. Always unsigned, always little-endian on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleWidth {
    #[default]
    Byte,
    Short,
    Word,
}

impl SampleWidth {
    pub fn bits(self) -> u32 {
        match self {
            SampleWidth::Byte => 8,
            SampleWidth::Short => 16,
            SampleWidth::Word => 32,
        }
    }

    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    pub fn is_signed(self) -> bool {
        false
    }

    pub fn max_value(self) -> u32 {
        match self {
            SampleWidth::Byte => u8::MAX as u32,
            SampleWidth::Short => u16::MAX as u32,
            SampleWidth::Word => u32::MAX,
        }
    }

    fn read(self, sample: &[u8]) -> u32 {
        match self {
            SampleWidth::Byte => sample[0] as u32,
            SampleWidth::Short => u16::from_le_bytes([sample[0], sample[1]]) as u32,
            SampleWidth::Word => u32::from_le_bytes([sample[0], sample[1], sample[2], sample[3]]),
        }
    }

    // Narrowing truncates, the same as a numeric cast
    fn write(self, sample: u32, out: &mut Vec<u8>) {
        match self {
            SampleWidth::Byte => out.push(sample as u8),
            SampleWidth::Short => out.extend_from_slice(&(sample as u16).to_le_bytes()),
            SampleWidth::Word => out.extend_from_slice(&sample.to_le_bytes()),
        }
    }
}

impl FromStr for SampleWidth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uint8" | "u8" | "8" => Ok(SampleWidth::Byte),
            "uint16" | "u16" | "16" => Ok(SampleWidth::Short),
            "uint32" | "u32" | "32" => Ok(SampleWidth::Word),
            _ => Err(Error::InvalidType(s.to_string())),
        }
    }
}

impl fmt::Display for SampleWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uint{}", self.bits())
    }
}

pub fn decode_bytes(bytes: &[u8], sample_type: SampleWidth) -> Result<RasterImage> {
    let (header, payload) = bytes
        .split_first_chunk::<HEADER_LEN>()
        .ok_or(Error::TruncatedHeader(bytes.len()))?;
    let width = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let height = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    debug!(
        "header: {}x{}, {} payload bytes as {}",
        width,
        height,
        payload.len(),
        sample_type
    );

    let expected = pixel_count(width, height)?;
    let sample_len = sample_type.bytes();
    if payload.len() % sample_len != 0 || payload.len() / sample_len != expected {
        return Err(Error::PayloadLengthMismatch {
            expected,
            // A trailing partial sample still counts as one
            actual: payload.len().div_ceil(sample_len),
        });
    }

    let pixels = payload
        .chunks_exact(sample_len)
        .map(|s| sample_type.read(s))
        .collect();
    RasterImage::new(width, height, pixels)
}

pub fn encode_bytes(image: &RasterImage, sample_type: SampleWidth) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + image.pixels().len() * sample_type.bytes());
    bytes.extend_from_slice(&image.width().to_le_bytes());
    bytes.extend_from_slice(&image.height().to_le_bytes());
    for &p in image.pixels() {
        sample_type.write(p, &mut bytes);
    }
    bytes
}

pub fn decode(path: &Path, sample_type: SampleWidth) -> Result<RasterImage> {
    let bytes = fs::read(path)?;
    decode_bytes(&bytes, sample_type)
}

pub fn encode(path: &Path, image: &RasterImage, sample_type: SampleWidth) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(&encode_bytes(image, sample_type))?;
    out.flush()?;
    Ok(())
}
