//! Dataset constants and runtime configuration defaults

// Canvas geometry shared by the renderer, encoder and persistence writer
/// Side length of the square annotation canvas in pixels
pub const CANVAS_SIZE: u32 = 640;
/// Fill color for the padded area of the canvas
pub const PAD_COLOR: [u8; 3] = [114, 114, 114];
/// Outline color for regions drawn on preview frames
pub const OUTLINE_COLOR: [u8; 3] = [255, 0, 0];

// Single-class detection dataset
/// Class id written on every label line
pub const DETECTION_CLASS_ID: u32 = 0;

// Input discovery
/// Image extensions accepted by the annotation queue and the split tool
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
/// Spreadsheet column holding the image base name
pub const IMAGE_COLUMN: &str = "Image";
/// Spreadsheet column holding the reference prescription text
pub const PRESCRIPTION_COLUMN: &str = "Prescription";
/// Text shown when an image has no spreadsheet entry
pub const MISSING_PRESCRIPTION_TEXT: &str = "No prescription text found";

// Output layout
/// Suffix appended to the image base name for every persisted artifact
pub const RESIZED_SUFFIX: &str = "_resized";
/// Extension of the persisted canvas frame
pub const RESIZED_IMAGE_EXTENSION: &str = "jpg";
/// Infix between the base name and the region index for crop artifacts
pub const REGION_INFIX: &str = "_box";
/// Directory name for resized canvas frames
pub const IMAGES_DIR_NAME: &str = "images";
/// Directory name for detection label files
pub const LABELS_DIR_NAME: &str = "labels";
/// Directory name for per-region crops and text
pub const ANNOTATIONS_DIR_NAME: &str = "annotations";

// Train/validation split
/// Fixed seed for reproducible partitions
pub const DEFAULT_SEED: u64 = 42;
/// Share of images assigned to the training side
pub const DEFAULT_TRAIN_RATIO: f64 = 0.9;
/// Directory name for the training partition
pub const TRAIN_DIR_NAME: &str = "train";
/// Directory name for the validation partition
pub const VAL_DIR_NAME: &str = "val";

// Ink enhancement, in 8-bit HSV (hue 0..180)
/// Inclusive lower HSV bound of blue ink
pub const BLUE_HSV_LOWER: [u8; 3] = [90, 50, 50];
/// Inclusive upper HSV bound of blue ink
pub const BLUE_HSV_UPPER: [u8; 3] = [130, 255, 255];
/// Inclusive lower HSV bound of dark text
pub const DARK_HSV_LOWER: [u8; 3] = [0, 0, 0];
/// Inclusive upper HSV bound of dark text
pub const DARK_HSV_UPPER: [u8; 3] = [180, 50, 50];
/// Per-channel brightness boost for blue ink
pub const BLUE_BOOST: u8 = 50;
/// Extension of the images processed by the enhancement tool
pub const ENHANCE_EXTENSION: &str = ".jpg";
/// Suffix of the ground-truth sidecar copied alongside enhanced images
pub const GROUND_TRUTH_SUFFIX: &str = ".gt.txt";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
