//! Shared error types (renderer-agnostic).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum XformError {
    /// Composition was asked to multiply an empty list of matrices.
    #[error("No Matrix")]
    NoMatrix,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Canvas Size must be bigger than 0. (got {width}x{height})")]
    CanvasSizeRange { width: f64, height: f64 },
}

pub type XformResult<T> = Result<T, XformError>;
