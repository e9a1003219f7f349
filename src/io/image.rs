//! Image decoding and encoding with path-aware errors

use crate::io::error::{DatasetError, Result};
use image::{DynamicImage, RgbImage};
use std::path::Path;

/// Decode the image at `path`, format chosen from its contents
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a supported image
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| DatasetError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Encode `image` to `path`, format chosen from the extension
///
/// # Errors
///
/// Returns an error if the extension names no supported format or the file
/// cannot be written
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|e| DatasetError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// True when `path` has one of `extensions`, compared case-insensitively
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}
