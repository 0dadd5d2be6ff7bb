use thiserror::Error;

/// Why an imported schedule was rejected. Nothing is applied when decoding fails.
#[derive(Debug, Error)]
pub enum DecodeFormatError {
    #[error("schedule is not a JSON object of date/shift strings: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("\"{key}\" is not a calendar date (expected YYYY-MM-DD)")]
    InvalidDate { key: String },
    #[error("unknown shift type \"{name}\" on {date}")]
    UnknownShift { date: String, name: String },
}
