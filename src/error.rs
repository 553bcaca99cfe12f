use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while extracting a palette.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A configuration value is outside its documented range. Reported before any pixel is counted.
    #[error("invalid value for {option}: {value}")]
    InvalidConfig { option: &'static str, value: String },
    /// Not enough samples reached a stage for it to compute anything meaningful.
    #[error("not enough colors reached the {stage} stage ({count} samples)")]
    InsufficientData { stage: Stage, count: usize },
    /// A sample with non-positive mass reached the scorer.
    #[error("sample {rgb:?} has non-positive amount {amount}")]
    InvalidSample { rgb: (u8, u8, u8), amount: f64 },
}

/// The pipeline stage an [`Error::InsufficientData`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Bundle,
    Score,
}

impl Error {
    pub(crate) fn invalid_config(option: &'static str, value: impl ToString) -> Self {
        Self::InvalidConfig {
            option,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Bundle => f.write_str("bundling"),
            Stage::Score => f.write_str("scoring"),
        }
    }
}
