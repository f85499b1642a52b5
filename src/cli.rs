use crate::codec::SampleWidth;
use crate::commands::{self, Command};
use crate::export::ExportFormat;
use crate::logger;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Image to display next to its .out companion, if there is one
    file_path: Option<PathBuf>,
    #[arg(
        short,
        long,
        global = true,
        default_value = "uint8",
        value_parser = parse_sample_width,
        help = "Sample type: uint8, uint16 or uint32"
    )]
    sample: SampleWidth,
    #[arg(short, long, global = true, help = "Log debug output")]
    verbose: bool,
}

fn parse_sample_width(s: &str) -> Result<SampleWidth, String> {
    s.parse().map_err(|e: crate::error::Error| e.to_string())
}

impl Cli {
    pub fn run(self) {
        logger::init(self.verbose);
        let result = match (self.command, self.file_path) {
            (Some(command), _) => command.run(self.sample),
            (None, Some(file_path)) => commands::open(&file_path, self.sample),
            (None, None) => commands::convert_dir(Path::new("."), self.sample, ExportFormat::Png)
                .map(|report| println!("{}", report)),
        };
        if let Err(e) = result {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
