//! @acp:module "Errors"
//! @acp:summary "Error types for time allocation, planning and deck loading"
//! @acp:domain timing
//! @acp:layer model

use thiserror::Error;

/// Library result type
pub type Result<T> = std::result::Result<T, TimingError>;

/// @acp:summary "Errors raised at the allocation boundary and by deck/config I/O"
#[derive(Debug, Error)]
pub enum TimingError {
    #[error("no slides to allocate time for")]
    NoSlides,

    #[error("target duration must be a positive number of minutes, got {0}")]
    InvalidDuration(f64),

    #[error("slide numbers start at 1, got {0}")]
    InvalidSlideNumber(u32),

    #[error("slide {0} appears more than once")]
    DuplicateSlide(u32),

    #[error("slide {slide}: {reason}")]
    InvalidDescriptor { slide: u32, reason: String },

    #[error("invalid timing tables: {0}")]
    InvalidTables(String),

    #[error("invalid presentation budget: {0}")]
    InvalidPlan(String),

    #[error("unknown {kind} '{value}'")]
    UnknownLabel { kind: &'static str, value: String },

    #[error("unsupported deck format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TimingError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        TimingError::UnknownLabel {
            kind,
            value: value.to_string(),
        }
    }
}
