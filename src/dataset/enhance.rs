//! Ink recoloring to raise text contrast

use crate::dataset::color::Hsv;
use crate::io::configuration::{
    BLUE_BOOST, BLUE_HSV_LOWER, BLUE_HSV_UPPER, DARK_HSV_LOWER, DARK_HSV_UPPER, ENHANCE_EXTENSION,
    GROUND_TRUTH_SUFFIX,
};
use crate::io::error::{Result, WithPath};
use crate::io::image::{load_image, save_image};
use crate::io::progress::ProgressManager;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Whiten dark pixels and brighten blue ink
///
/// Both masks are taken from the input pixel. Dark pixels are set to white
/// first; blue pixels then gain [`BLUE_BOOST`] on every channel, saturating.
pub fn enhance_image(source: &RgbImage) -> RgbImage {
    let mut output = source.clone();
    for (pixel, original) in output.pixels_mut().zip(source.pixels()) {
        *pixel = enhance_pixel(*original);
    }
    output
}

/// Enhancement rule for a single pixel
pub fn enhance_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let hsv = Hsv::from_rgb(pixel);
    let mut result = if hsv.in_range(DARK_HSV_LOWER, DARK_HSV_UPPER) {
        Rgb([255, 255, 255])
    } else {
        pixel
    };
    if hsv.in_range(BLUE_HSV_LOWER, BLUE_HSV_UPPER) {
        for channel in &mut result.0 {
            *channel = channel.saturating_add(BLUE_BOOST);
        }
    }
    result
}

/// Counts from an enhancement run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnhanceReport {
    /// Images written to the output folder
    pub processed: usize,
    /// Images that could not be decoded
    pub skipped: Vec<PathBuf>,
    /// Processed images with no ground-truth sidecar
    pub missing_ground_truth: Vec<PathBuf>,
}

/// Enhance every `.jpg` in `input_dir` into `output_dir`
///
/// The output folder is created if needed. Each image's `<stem>.gt.txt`
/// sidecar is copied next to the enhanced image. Undecodable images and
/// missing sidecars are logged and reported, not fatal.
///
/// # Errors
///
/// Returns an error if the folders cannot be read or created, or an output
/// file cannot be written
pub fn enhance_folder(
    input_dir: &Path,
    output_dir: &Path,
    mut progress: Option<&mut ProgressManager>,
) -> Result<EnhanceReport> {
    std::fs::create_dir_all(output_dir).with_path(output_dir, "create output directory")?;

    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(input_dir).with_path(input_dir, "read input directory")? {
        let path = entry.with_path(input_dir, "read input directory entry")?.path();
        let is_jpg = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(ENHANCE_EXTENSION));
        if is_jpg && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();

    if let Some(pm) = progress.as_deref_mut() {
        pm.initialize(inputs.len(), "Enhancing");
    }

    let mut report = EnhanceReport::default();
    for path in &inputs {
        enhance_file(path, output_dir, &mut report)?;
        if let Some(pm) = progress.as_deref_mut() {
            pm.advance(path);
        }
    }

    if let Some(pm) = progress.as_deref_mut() {
        pm.finish();
    }
    log::info!(
        "Enhanced {} image(s) into {}",
        report.processed,
        output_dir.display()
    );
    Ok(report)
}

fn enhance_file(path: &Path, output_dir: &Path, report: &mut EnhanceReport) -> Result<()> {
    let Some(file_name) = path.file_name() else {
        return Ok(());
    };

    let source = match load_image(path) {
        Ok(image) => image.to_rgb8(),
        Err(err) => {
            log::warn!("Failed to load {}: {err}", path.display());
            report.skipped.push(path.to_path_buf());
            return Ok(());
        }
    };

    save_image(&enhance_image(&source), &output_dir.join(file_name))?;
    report.processed += 1;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let sidecar_name = format!("{stem}{GROUND_TRUTH_SUFFIX}");
    let sidecar = path.with_file_name(&sidecar_name);
    if sidecar.is_file() {
        let target = output_dir.join(&sidecar_name);
        std::fs::copy(&sidecar, &target).with_path(&sidecar, "copy ground truth")?;
    } else {
        log::warn!("Ground truth {} not found", sidecar.display());
        report.missing_ground_truth.push(sidecar);
    }
    Ok(())
}
