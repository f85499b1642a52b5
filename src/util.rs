use std::path::{Path, PathBuf};

pub const SOURCE_EXT: &str = "bin";
pub const DESTINATION_EXT: &str = "out";

/// `lena.bin` -> `lena.out`
pub fn companion_path(path: &Path) -> PathBuf {
    path.with_extension(DESTINATION_EXT)
}

pub fn is_raster_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(SOURCE_EXT | DESTINATION_EXT)
    )
}

/// `lena.bin` -> `lena_bin.png`
pub fn export_name(path: &Path, extension: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().replace('.', "_"))
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}", name, extension))
}
