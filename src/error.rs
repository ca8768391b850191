use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{field} value {value} does not fit its field (max {max})")]
    ValueOutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("Framing error in {section} at offset {offset}: {message}")]
    Framing {
        section: &'static str,
        offset: usize,
        message: String,
    },

    #[error("Invalid base64 vault id: {0}")]
    Base64(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
