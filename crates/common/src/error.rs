//! Common error types.

use thiserror::Error;

/// Main error type for the mosaic crates.
#[derive(Error, Debug)]
pub enum MosaicError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Selector error: {0}")]
    Selector(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MosaicResult<T> = Result<T, MosaicError>;

impl MosaicError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn selector(msg: impl Into<String>) -> Self {
        Self::Selector(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
