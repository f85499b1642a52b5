use crate::codec::{self, SampleWidth};
use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::gfx;
use crate::img::RasterImage;
use crate::scale::{self, Region, ScaleFactor};
use crate::util;
use clap::Subcommand;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert every .bin and .out file in a directory
    Convert {
        #[arg(default_value = ".")]
        dir: PathBuf,
        #[arg(
            short = 't',
            long = "target",
            default_value = "png",
            help = "Target image format (png, pgm)"
        )]
        target: ExportFormat,
    },
    /// Scale a region of an image and write it next to the source as <stem>.out
    Scale {
        file_path: PathBuf,
        #[arg(allow_negative_numbers = true, help = "-4..=-1 shrinks, 1..=4 enlarges")]
        x_scale: i32,
        #[arg(allow_negative_numbers = true, help = "Defaults to the x scale")]
        y_scale: Option<i32>,
        #[arg(
            short,
            long,
            num_args = 4,
            value_names = ["X", "Y", "W", "H"],
            help = "Part of the image to scale, defaults to all of it"
        )]
        region: Option<Vec<u32>>,
    },
    /// Print the header and sample range of an image
    Info { file_path: PathBuf },
}

impl Command {
    pub fn run(self, sample: SampleWidth) -> Result<()> {
        match self {
            Command::Convert { dir, target } => {
                let report = convert_dir(&dir, sample, target)?;
                println!("{}", report);
                Ok(())
            }
            Command::Scale {
                file_path,
                x_scale,
                y_scale,
                region,
            } => {
                let region = region.map(|r| Region {
                    x: r[0],
                    y: r[1],
                    width: r[2],
                    height: r[3],
                });
                let out = scale_file(
                    &file_path,
                    sample,
                    region,
                    x_scale,
                    y_scale.unwrap_or(x_scale),
                )?;
                println!("Image saved to {}", out.display());
                Ok(())
            }
            Command::Info { file_path } => info(&file_path, sample),
        }
    }
}

/// What `open` will put on screen for a given file.
#[derive(Debug, PartialEq, Eq)]
pub enum DisplayPlan {
    Missing(PathBuf),
    Single(PathBuf),
    Pair { source: PathBuf, destination: PathBuf },
}

pub fn plan_display(file_path: &Path) -> DisplayPlan {
    if !file_path.is_file() {
        return DisplayPlan::Missing(file_path.to_path_buf());
    }
    let destination = util::companion_path(file_path);
    if destination != file_path && destination.is_file() {
        DisplayPlan::Pair {
            source: file_path.to_path_buf(),
            destination,
        }
    } else {
        DisplayPlan::Single(file_path.to_path_buf())
    }
}

/// Decodes what `plan` names. An empty destination is dropped so the source
/// still gets shown.
pub fn load_display(plan: &DisplayPlan, sample: SampleWidth) -> Result<(Vec<RasterImage>, String)> {
    match plan {
        DisplayPlan::Missing(path) => Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        ))),
        DisplayPlan::Single(path) => {
            let img = codec::decode(path, sample)?;
            Ok((vec![img], path.to_string_lossy().into_owned()))
        }
        DisplayPlan::Pair {
            source,
            destination,
        } => {
            let src = codec::decode(source, sample)?;
            let dst = codec::decode(destination, sample)?;
            if dst.is_empty() {
                warn!(
                    "{} is {}x{}, showing {} alone",
                    destination.display(),
                    dst.width(),
                    dst.height(),
                    source.display()
                );
                return Ok((vec![src], source.to_string_lossy().into_owned()));
            }
            let title = format!("{} | {}", source.display(), destination.display());
            Ok((vec![src, dst], title))
        }
    }
}

pub fn open(file_path: &Path, sample: SampleWidth) -> Result<()> {
    let plan = plan_display(file_path);
    if let DisplayPlan::Missing(path) = &plan {
        println!("File {} not found", path.display());
        return Ok(());
    }
    let (images, title) = load_display(&plan, sample)?;
    let images: Vec<&RasterImage> = images.iter().collect();
    gfx::show(&images, &title)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConvertReport {
    pub converted: Vec<PathBuf>,
    pub failed: usize,
}

impl std::fmt::Display for ConvertReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Converted {} file(s)", self.converted.len())?;
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        Ok(())
    }
}

pub fn convert_file(path: &Path, sample: SampleWidth, target: ExportFormat) -> Result<PathBuf> {
    let img = codec::decode(path, sample)?;
    let output_path = util::export_name(path, target.extension());
    fs::write(&output_path, target.encode(&img)?)?;
    info!("{} -> {}", path.display(), output_path.display());
    Ok(output_path)
}

/// Converts each raster file in `dir`. A bad file is logged and skipped.
pub fn convert_dir(dir: &Path, sample: SampleWidth, target: ExportFormat) -> Result<ConvertReport> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && util::is_raster_file(p))
        .collect();
    files.sort();
    debug!("{} raster file(s) in {}", files.len(), dir.display());

    let mut report = ConvertReport::default();
    for file in &files {
        match convert_file(file, sample, target) {
            Ok(out) => report.converted.push(out),
            Err(e) => {
                warn!("skipping {}: {}", file.display(), e);
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

pub fn scale_file(
    file_path: &Path,
    sample: SampleWidth,
    region: Option<Region>,
    x_scale: i32,
    y_scale: i32,
) -> Result<PathBuf> {
    let x_scale = ScaleFactor::new(x_scale)?;
    let y_scale = ScaleFactor::new(y_scale)?;
    let output_path = util::companion_path(file_path);
    if output_path == file_path {
        return Err(Error::WouldOverwrite(output_path));
    }

    let img = codec::decode(file_path, sample)?;
    let region = region.unwrap_or_else(|| Region::full(&img));
    let out = scale::scale(&img, region, x_scale, y_scale)?;
    codec::encode(&output_path, &out, sample)?;
    info!(
        "scaled {}x{} region by ({}, {}) to {}x{}",
        region.width,
        region.height,
        x_scale.get(),
        y_scale.get(),
        out.width(),
        out.height()
    );
    Ok(output_path)
}

fn info(file_path: &Path, sample: SampleWidth) -> Result<()> {
    let img = codec::decode(file_path, sample)?;
    println!("{}", file_path.display());
    println!("width: {}", img.width());
    println!("height: {}", img.height());
    println!(
        "sample: {} ({}, max {})",
        sample,
        if sample.is_signed() { "signed" } else { "unsigned" },
        sample.max_value()
    );
    match img.min_max() {
        Some((min, max)) => println!("range: {}..={}", min, max),
        None => println!("range: empty"),
    }
    Ok(())
}
