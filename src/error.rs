use std::path::PathBuf;

use thiserror::Error;

/// Failure converting a single file. Never aborts a batch.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Reasons a batch cannot start.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Please select a folder or image files first.")]
    EmptySelection,

    #[error("No supported images found in the selection.")]
    NoSupportedImages,

    #[error("cannot create output folder {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
