//! Command-line interface for the annotation session and dataset tools

use crate::dataset::enhance::enhance_folder;
use crate::dataset::split::{SplitConfig, split_dataset};
use crate::io::configuration::{DEFAULT_SEED, DEFAULT_TRAIN_RATIO};
use crate::io::console::{OperatorConsole, SessionEnd};
use crate::io::error::Result;
use crate::io::persistence::{OutputLayout, PersistenceWriter};
use crate::io::progress::ProgressManager;
use crate::session::controller::SessionController;
use crate::sources::prescriptions::PrescriptionIndex;
use crate::sources::queue::ImageQueue;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rx-annotate")]
#[command(
    author,
    version,
    about = "Annotate prescription images and prepare the detection dataset"
)]
/// Command-line arguments for the toolchain
pub struct Cli {
    /// Tool to run
    #[command(subcommand)]
    pub tool: Tool,

    /// Suppress progress output and informational logs
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available tools
#[derive(Subcommand)]
pub enum Tool {
    /// Draw and label boxes on each image, one image at a time
    Annotate(AnnotateArgs),
    /// Copy annotated images and labels into train/val sets
    Split(SplitArgs),
    /// Whiten dark text and brighten blue ink
    Enhance(EnhanceArgs),
}

/// Arguments of the `annotate` tool
#[derive(Args)]
pub struct AnnotateArgs {
    /// Spreadsheet with `Image` and `Prescription` columns
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Folder containing the images to annotate
    #[arg(value_name = "IMAGES")]
    pub images: PathBuf,

    /// Folder holding the images/, labels/ and annotations/ output folders
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Resized frame folder, overriding <OUTPUT>/images
    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    /// Label file folder, overriding <OUTPUT>/labels
    #[arg(long)]
    pub labels_dir: Option<PathBuf>,

    /// Region crop folder, overriding <OUTPUT>/annotations
    #[arg(long)]
    pub annotations_dir: Option<PathBuf>,

    /// Write the outlined canvas to this PNG after every action
    #[arg(short, long)]
    pub preview: Option<PathBuf>,
}

impl AnnotateArgs {
    /// Output layout after applying per-directory overrides
    pub fn layout(&self) -> OutputLayout {
        let defaults = OutputLayout::under(&self.output);
        OutputLayout {
            images: self.images_dir.clone().unwrap_or(defaults.images),
            labels: self.labels_dir.clone().unwrap_or(defaults.labels),
            annotations: self.annotations_dir.clone().unwrap_or(defaults.annotations),
        }
    }
}

/// Arguments of the `split` tool
#[derive(Args)]
pub struct SplitArgs {
    /// Folder holding images/ and labels/
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Folder receiving train/ and val/
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Random seed for a reproducible partition
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Share of images assigned to training
    #[arg(short, long, default_value_t = DEFAULT_TRAIN_RATIO)]
    pub ratio: f64,
}

/// Arguments of the `enhance` tool
#[derive(Args)]
pub struct EnhanceArgs {
    /// Folder with .jpg images and .gt.txt sidecars
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Folder receiving the enhanced copies
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter when `RUST_LOG` is unset
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }
}

/// Runs the tool selected on the command line
pub struct ToolRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl ToolRunner {
    /// Create a runner for the parsed arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the selected tool to completion
    ///
    /// # Errors
    ///
    /// Returns setup, persistence and file system errors from the tool
    pub fn run(&mut self) -> Result<()> {
        match &self.cli.tool {
            Tool::Annotate(args) => Self::annotate(args),
            Tool::Split(args) => {
                let config = SplitConfig {
                    source_dir: args.source.clone(),
                    output_dir: args.output.clone(),
                    train_ratio: args.ratio,
                    seed: args.seed,
                };
                split_dataset(&config, self.progress_manager.as_mut())?;
                Ok(())
            }
            Tool::Enhance(args) => {
                let report =
                    enhance_folder(&args.input, &args.output, self.progress_manager.as_mut())?;
                if !report.skipped.is_empty() {
                    log::warn!("{} image(s) could not be loaded", report.skipped.len());
                }
                Ok(())
            }
        }
    }

    fn annotate(args: &AnnotateArgs) -> Result<()> {
        let prescriptions = PrescriptionIndex::from_workbook(&args.workbook)?;
        let layout = args.layout();
        layout.validate()?;
        let queue = ImageQueue::scan(&args.images, &layout)?;

        let mut controller =
            SessionController::new(prescriptions, queue, PersistenceWriter::new(layout));
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut console = OperatorConsole::new(stdin.lock(), stdout.lock(), args.preview.clone());
        let summary = console.run(&mut controller)?;

        match summary.end {
            SessionEnd::Completed => log::info!(
                "Annotation complete, {} image(s) written",
                summary.persisted_images
            ),
            SessionEnd::Interrupted => log::info!(
                "Session stopped early, {} image(s) written",
                summary.persisted_images
            ),
        }
        Ok(())
    }
}
