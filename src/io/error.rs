//! Error types and path context for dataset operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for annotation and dataset operations
#[derive(Debug)]
pub enum DatasetError {
    /// Failed to decode a source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// The prescription spreadsheet could not be opened or parsed
    SpreadsheetRead {
        /// Path to the workbook
        path: PathBuf,
        /// Underlying workbook error
        source: calamine::Error,
    },

    /// A required spreadsheet column is absent from the header row
    MissingColumn {
        /// Name of the missing column
        column: &'static str,
    },

    /// The image folder holds no supported image files
    NoImagesFound {
        /// Folder that was scanned
        folder: PathBuf,
    },

    /// A required output directory does not exist
    MissingOutputDirectory {
        /// Role of the directory in the output layout
        role: &'static str,
        /// Expected location
        path: PathBuf,
    },

    /// Source data doesn't meet tool requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Writing an image's annotation artifacts stopped part way
    ///
    /// Artifacts listed in `written` are left on disk as they are.
    Persistence {
        /// Artifact whose write failed
        artifact: PathBuf,
        /// Artifacts written for the same image before the failure
        written: Vec<PathBuf>,
        /// The failure itself
        source: Box<DatasetError>,
    },

    /// Reading operator input or writing console output failed
    Console {
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::SpreadsheetRead { path, source } => {
                write!(
                    f,
                    "Could not read spreadsheet '{}': {source}",
                    path.display()
                )
            }
            Self::MissingColumn { column } => {
                write!(f, "Spreadsheet must have a '{column}' column")
            }
            Self::NoImagesFound { folder } => {
                write!(f, "No images found in '{}'", folder.display())
            }
            Self::MissingOutputDirectory { role, path } => {
                write!(
                    f,
                    "Required {role} directory '{}' not found",
                    path.display()
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Persistence {
                artifact,
                written,
                source,
            } => {
                write!(
                    f,
                    "Failed to persist '{}' after writing {} file(s), output for this image is incomplete: {source}",
                    artifact.display(),
                    written.len()
                )
            }
            Self::Console { source } => write!(f, "Console I/O failed: {source}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::SpreadsheetRead { source, .. } => Some(source),
            Self::FileSystem { source, .. } | Self::Console { source } => Some(source),
            Self::Persistence { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Convenience type alias for dataset results
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Attaches the path and operation to low-level I/O failures
pub trait WithPath<T> {
    /// Convert the error into [`DatasetError::FileSystem`] for `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| DatasetError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DatasetError {
    DatasetError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> DatasetError {
    DatasetError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
