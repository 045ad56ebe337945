use thiserror::Error;

use crate::period::YearMonth;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("setting '{name}' not found. Available settings: {available}")]
    UnknownSetting { name: String, available: String },
    #[error("identifier level '{0}' not found. Available levels: tax_id, ccn, org_npi, personal_npi")]
    UnknownLevel(String),
    #[error("table role '{0}' not found. Expected claim or line")]
    UnknownTable(String),
    #[error("unknown setting format '{0}'. Expected institutional or non_institutional")]
    UnknownFormat(String),
    #[error("month value {month} must be between 1 and 12")]
    InvalidMonth { month: u32 },
    #[error("range start {start} must be before or equal to range end {end}")]
    InvertedRange { start: YearMonth, end: YearMonth },
    #[error("invalid period '{0}': expected YYYY-MM")]
    InvalidPeriod(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
