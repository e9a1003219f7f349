//! Image queue discovery with the resume filter

use crate::io::configuration::IMAGE_EXTENSIONS;
use crate::io::error::{DatasetError, Result, WithPath};
use crate::io::image::has_extension;
use crate::io::persistence::OutputLayout;
use std::path::{Path, PathBuf};

/// Ordered, fixed list of images still to annotate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageQueue {
    paths: Vec<PathBuf>,
    skipped: usize,
}

impl ImageQueue {
    /// Scan `folder` (non-recursively) for images not yet annotated
    ///
    /// An image is skipped when its resized frame already exists in
    /// `layout`. Paths are sorted so reruns see the same order.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be read or contains no images
    pub fn scan(folder: &Path, layout: &OutputLayout) -> Result<Self> {
        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(folder).with_path(folder, "read image folder")? {
            let path = entry.with_path(folder, "read image folder entry")?.path();
            if path.is_file() && has_extension(&path, &IMAGE_EXTENSIONS) {
                candidates.push(path);
            }
        }

        if candidates.is_empty() {
            return Err(DatasetError::NoImagesFound {
                folder: folder.to_path_buf(),
            });
        }

        candidates.sort();
        Ok(Self::filter_processed(candidates, layout))
    }

    /// Drop candidates whose resized frame already exists
    pub fn filter_processed(candidates: Vec<PathBuf>, layout: &OutputLayout) -> Self {
        let total = candidates.len();
        let paths: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|path| {
                let done = layout.resized_image_path(&base_name(path)).exists();
                if done {
                    log::debug!("Skipping {} (already annotated)", path.display());
                }
                !done
            })
            .collect();
        let skipped = total - paths.len();

        log::info!(
            "{} image(s) queued, {skipped} already annotated",
            paths.len()
        );
        Self { paths, skipped }
    }

    /// Queue in order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Image at queue position `index`
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    /// Number of queued images
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when every image was already annotated
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Images excluded by the resume filter
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

/// File stem used to name every artifact of an image
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
