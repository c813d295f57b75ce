// crates/seatrack-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid input file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to walk input directory: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Failed to parse config file: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
