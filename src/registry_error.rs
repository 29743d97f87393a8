use thiserror::Error;

/// Failures that abort a whole conversion.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems confined to a single value or line. The offending item is
/// skipped and the conversion carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionWarning {
    #[error("unknown value type {type_name} for value '{name}' in [{key}], ignoring this value")]
    UnknownValueType {
        key: String,
        name: String,
        type_name: String,
    },
    #[error("invalid data for value '{name}' in [{key}]: {reason}, ignoring this value")]
    InvalidValueData {
        key: String,
        name: String,
        reason: String,
    },
    #[error("invalid line at line {line}: {content}: {reason}, ignoring this line")]
    InvalidLine {
        line: usize,
        content: String,
        reason: String,
    },
}
