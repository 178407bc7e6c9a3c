use thiserror::Error;

/// Everything that can go wrong while decoding and processing a raw file.
///
/// Errors are per file: a batch run reports the failed file and moves on
/// to the next one.
#[derive(Debug, Error)]
pub enum PakonError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("format error: {0}")]
  Format(String),
  #[error("buffer too small: needed {needed} bytes but got {got}")]
  BufferSize { needed: usize, got: usize },
  #[error("degenerate image: {0}")]
  Degenerate(String),
}

pub type Result<T> = std::result::Result<T, PakonError>;
