use std::path::Path;

/// Extensions the converter reads and writes, in the order shown in the format selector.
pub const SUPPORTED_EXTENSIONS: [&str; 9] = [
    ".png", ".jpg", ".jpeg", ".bmp", ".tiff", ".tif", ".webp", ".gif", ".ico",
];

/// Folder (relative to the working directory) converted files are written to.
pub const SAVE_FOLDER: &str = "saved";

pub const DEFAULT_OUTPUT_EXTENSION: &str = ".png";

pub const WINDOW_SIZE: [f32; 2] = [560.0, 520.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [420.0, 360.0];

/// Case-insensitive check of a path's extension against [`SUPPORTED_EXTENSIONS`].
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.trim_start_matches('.') == ext_lower)
        })
        .unwrap_or(false)
}
