//! Batch progress display for the dataset tools

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] {{prefix}}: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar over a batch of files
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    completed: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active bar
    pub const fn new() -> Self {
        Self {
            bar: None,
            completed: 0,
        }
    }

    /// Start a bar for `file_count` files labelled with `prefix`
    pub fn initialize(&mut self, file_count: usize, prefix: &'static str) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        bar.set_prefix(prefix);
        self.bar = Some(bar);
        self.completed = 0;
    }

    /// Mark one file as done
    pub fn advance(&mut self, path: &Path) {
        self.completed += 1;
        if let Some(ref bar) = self.bar {
            bar.set_message(
                path.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
            bar.inc(1);
        }
    }

    /// Files completed since the last [`ProgressManager::initialize`]
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
