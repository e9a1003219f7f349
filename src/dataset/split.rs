//! Reproducible train/validation split of the annotated corpus

use crate::io::configuration::{
    IMAGE_EXTENSIONS, IMAGES_DIR_NAME, LABELS_DIR_NAME, TRAIN_DIR_NAME, VAL_DIR_NAME,
};
use crate::io::error::{Result, WithPath, invalid_parameter, invalid_source};
use crate::io::image::has_extension;
use crate::io::progress::ProgressManager;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};

/// Image file names assigned to each side of the split
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitPlan {
    /// Training image file names
    pub train: Vec<String>,
    /// Validation image file names
    pub val: Vec<String>,
}

/// Partition `files` into train and validation sides
///
/// Files are sorted, shuffled with a generator seeded from `seed`, and the
/// first `n - floor(ratio * n)` go to validation. The same inputs always give
/// the same plan, whatever order `files` arrives in.
///
/// # Errors
///
/// Returns an error if `train_ratio` is not strictly between 0 and 1, or the
/// training side would be empty
pub fn plan_split(mut files: Vec<String>, train_ratio: f64, seed: u64) -> Result<SplitPlan> {
    if !(train_ratio > 0.0 && train_ratio < 1.0) {
        return Err(invalid_parameter(
            "train_ratio",
            &train_ratio,
            &"must be between 0 and 1 (exclusive)",
        ));
    }

    let total = files.len();
    let train_count = (train_ratio * total as f64).floor() as usize;
    if train_count == 0 {
        return Err(invalid_source(&format!(
            "{total} image(s) leave no training images at ratio {train_ratio}"
        )));
    }

    files.sort();
    let mut rng = StdRng::seed_from_u64(seed);
    files.shuffle(&mut rng);

    let train = files.split_off(total - train_count);
    Ok(SplitPlan { train, val: files })
}

/// Options for [`split_dataset`]
#[derive(Debug, Clone, PartialEq)]
pub struct SplitConfig {
    /// Folder holding `images/` and `labels/`
    pub source_dir: PathBuf,
    /// Folder receiving `train/` and `val/`
    pub output_dir: PathBuf,
    /// Share of images assigned to training
    pub train_ratio: f64,
    /// Shuffle seed
    pub seed: u64,
}

/// What a split run copied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// The partition that was applied
    pub plan: SplitPlan,
    /// Images whose label file was not found
    pub missing_labels: Vec<String>,
}

/// Copy the corpus into `train/{images,labels}` and `val/{images,labels}`
///
/// Source files are never moved or deleted. An image without a label file is
/// still copied; the gap is logged and reported.
///
/// # Errors
///
/// Returns an error if the source folders are missing or hold no images, the
/// ratio is invalid, or a copy fails
pub fn split_dataset(
    config: &SplitConfig,
    mut progress: Option<&mut ProgressManager>,
) -> Result<SplitReport> {
    let image_dir = config.source_dir.join(IMAGES_DIR_NAME);
    let label_dir = config.source_dir.join(LABELS_DIR_NAME);
    for dir in [&image_dir, &label_dir] {
        if !dir.is_dir() {
            return Err(invalid_source(&format!(
                "source directory '{}' not found",
                dir.display()
            )));
        }
    }

    let files = list_images(&image_dir)?;
    if files.is_empty() {
        return Err(invalid_source(&format!(
            "no images found in '{}'",
            image_dir.display()
        )));
    }

    let missing_labels: Vec<String> = files
        .iter()
        .filter(|name| !label_dir.join(label_name(name)).exists())
        .cloned()
        .collect();
    if !missing_labels.is_empty() {
        log::warn!("Missing label files for: {missing_labels:?}");
    }

    let plan = plan_split(files, config.train_ratio, config.seed)?;

    if let Some(pm) = progress.as_deref_mut() {
        pm.initialize(plan.train.len() + plan.val.len(), "Splitting");
    }
    for (side, names) in [(TRAIN_DIR_NAME, &plan.train), (VAL_DIR_NAME, &plan.val)] {
        let side_dir = config.output_dir.join(side);
        let images_out = side_dir.join(IMAGES_DIR_NAME);
        let labels_out = side_dir.join(LABELS_DIR_NAME);
        for dir in [&images_out, &labels_out] {
            std::fs::create_dir_all(dir).with_path(dir, "create split directory")?;
        }

        for name in names {
            let src_image = image_dir.join(name);
            std::fs::copy(&src_image, images_out.join(name)).with_path(&src_image, "copy image")?;

            let label = label_name(name);
            let src_label = label_dir.join(&label);
            if src_label.exists() {
                std::fs::copy(&src_label, labels_out.join(&label))
                    .with_path(&src_label, "copy label")?;
            }

            if let Some(pm) = progress.as_deref_mut() {
                pm.advance(&src_image);
            }
        }
    }
    if let Some(pm) = progress.as_deref_mut() {
        pm.finish();
    }

    log::info!(
        "Train split: {} images, validation split: {} images, originals left in {}",
        plan.train.len(),
        plan.val.len(),
        config.source_dir.display()
    );
    Ok(SplitReport {
        plan,
        missing_labels,
    })
}

fn list_images(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_path(dir, "read image directory")? {
        let path = entry.with_path(dir, "read image directory entry")?.path();
        if !path.is_file() || !has_extension(&path, &IMAGE_EXTENSIONS) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            files.push(name.to_string());
        }
    }
    Ok(files)
}

/// Label file paired with an image file name
pub fn label_name(image_name: &str) -> String {
    let stem = Path::new(image_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    format!("{stem}.txt")
}
