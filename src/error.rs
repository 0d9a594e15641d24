use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MolinoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Catalog file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed catalog: {0}")]
    Format(String),

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MolinoError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, MolinoError::InvalidArgument(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MolinoError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, MolinoError>;
