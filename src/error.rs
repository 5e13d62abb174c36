use std::io;

use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maze needs at least one row and one column, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },

    #[error("maze of {rows}x{cols} exceeds the {max} cell limit per side")]
    OversizeDimension { rows: usize, cols: usize, max: usize },

    #[error("invalid value {value:?} for {name}")]
    InvalidSetting { name: &'static str, value: String },
}

/// Errors surfaced by the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, AppError>;
