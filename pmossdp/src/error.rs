use thiserror::Error;

/// Erreurs de lecture d'un message SSDP
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SsdpError {
    #[error("Malformed start line: {line:?}")]
    MalformedStartLine { line: String },

    #[error("Invalid status code: {value:?}")]
    InvalidStatusCode { value: String },

    #[error("Malformed header at line {line_number}: {line:?}")]
    MalformedHeader { line_number: usize, line: String },
}

pub type Result<T, E = SsdpError> = std::result::Result<T, E>;
