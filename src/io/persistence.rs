//! Output layout and the per-image persistence writer

use crate::canvas::encoding::encode_label_file;
use crate::io::configuration::{
    ANNOTATIONS_DIR_NAME, CANVAS_SIZE, IMAGES_DIR_NAME, LABELS_DIR_NAME, REGION_INFIX,
    RESIZED_IMAGE_EXTENSION, RESIZED_SUFFIX,
};
use crate::io::error::{DatasetError, Result, WithPath};
use crate::io::image::save_image;
use crate::session::region::Region;
use image::RgbImage;
use image::imageops;
use std::path::{Path, PathBuf};

/// The three directories annotation output is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Resized canvas frames
    pub images: PathBuf,
    /// Detection label files
    pub labels: PathBuf,
    /// Per-region crops and label text
    pub annotations: PathBuf,
}

impl OutputLayout {
    /// Standard `images/`, `labels/`, `annotations/` layout under `base`
    pub fn under(base: &Path) -> Self {
        Self {
            images: base.join(IMAGES_DIR_NAME),
            labels: base.join(LABELS_DIR_NAME),
            annotations: base.join(ANNOTATIONS_DIR_NAME),
        }
    }

    /// Check that every output directory exists
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingOutputDirectory`] for the first missing one
    pub fn validate(&self) -> Result<()> {
        for (role, path) in [
            ("images", &self.images),
            ("labels", &self.labels),
            ("annotations", &self.annotations),
        ] {
            if !path.is_dir() {
                return Err(DatasetError::MissingOutputDirectory {
                    role,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    /// `images/<base>_resized.jpg`
    pub fn resized_image_path(&self, base: &str) -> PathBuf {
        self.images
            .join(format!("{base}{RESIZED_SUFFIX}.{RESIZED_IMAGE_EXTENSION}"))
    }

    /// `labels/<base>_resized.txt`
    pub fn label_path(&self, base: &str) -> PathBuf {
        self.labels.join(format!("{base}{RESIZED_SUFFIX}.txt"))
    }

    /// `annotations/<base>_resized_box<N>.png`
    pub fn region_image_path(&self, base: &str, index: usize) -> PathBuf {
        self.annotations
            .join(format!("{base}{RESIZED_SUFFIX}{REGION_INFIX}{index}.png"))
    }

    /// `annotations/<base>_resized_box<N>.txt`
    pub fn region_text_path(&self, base: &str, index: usize) -> PathBuf {
        self.annotations
            .join(format!("{base}{RESIZED_SUFFIX}{REGION_INFIX}{index}.txt"))
    }
}

/// Files written for one image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistReport {
    /// Every artifact, in write order
    pub written: Vec<PathBuf>,
}

/// Writes a finished image's frame, label file and region crops
#[derive(Debug, Clone)]
pub struct PersistenceWriter {
    layout: OutputLayout,
}

impl PersistenceWriter {
    /// Create a writer over an already validated layout
    pub const fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    /// Output layout in use
    pub const fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Persist every artifact of one image
    ///
    /// Writes the frame, then the label file, then a crop and a text file per
    /// region. Nothing already written is removed when a later write fails.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Persistence`] naming the failed artifact and the
    /// ones written before it
    pub fn persist(&self, base: &str, frame: &RgbImage, regions: &[Region]) -> Result<PersistReport> {
        let mut report = PersistReport::default();

        let frame_path = self.layout.resized_image_path(base);
        report.step(frame_path, |path| save_image(frame, path))?;

        let label_path = self.layout.label_path(base);
        let body = encode_label_file(regions);
        report.step(label_path, |path| {
            std::fs::write(path, &body).with_path(path, "write label file")
        })?;

        for (index, region) in regions.iter().enumerate() {
            let crop_path = self.layout.region_image_path(base, index);
            report.step(crop_path, |path| save_image(&crop_region(frame, region)?, path))?;

            let text_path = self.layout.region_text_path(base, index);
            report.step(text_path, |path| {
                std::fs::write(path, region.label.as_bytes()).with_path(path, "write region text")
            })?;
        }

        log::info!(
            "Saved {} file(s) for {base} ({} region(s))",
            report.written.len(),
            regions.len()
        );
        Ok(report)
    }
}

impl PersistReport {
    fn step<F>(&mut self, artifact: PathBuf, write: F) -> Result<()>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        match write(&artifact) {
            Ok(()) => {
                log::debug!("Wrote {}", artifact.display());
                self.written.push(artifact);
                Ok(())
            }
            Err(source) => Err(DatasetError::Persistence {
                artifact,
                written: std::mem::take(&mut self.written),
                source: Box::new(source),
            }),
        }
    }
}

/// Crop a region out of the canvas frame, clipped to the canvas
///
/// # Errors
///
/// Returns an error if the region lies entirely off the canvas
pub fn crop_region(frame: &RgbImage, region: &Region) -> Result<RgbImage> {
    let (x, y, width, height) = region
        .rect
        .clamped_to_canvas(CANVAS_SIZE)
        .ok_or_else(|| DatasetError::InvalidSourceData {
            reason: format!("region '{}' lies outside the canvas", region.label),
        })?;
    Ok(imageops::crop_imm(frame, x, y, width, height).to_image())
}
