use thiserror::Error;

/// Failure of a client construction or a single write call.
///
/// Callers that need to branch on the HTTP status can use
/// [`status_code`](WriteError::status_code) instead of parsing messages.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The configuration was rejected before a client was constructed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The write request could not be serialized or compressed.
    #[error("unable to marshal protobuf: {0}")]
    Encoding(String),

    /// The HTTP exchange did not complete (DNS, connect, TLS, timeout,
    /// cancellation).
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-200 status.
    #[error("expected 200 response code, instead got: {code}, {body}")]
    Rejected { code: u16, body: String },
}

impl WriteError {
    /// The HTTP status code observed for this failure, or 0 when the
    /// failure happened before any response was received.
    pub fn status_code(&self) -> u16 {
        match self {
            WriteError::Rejected { code, .. } => *code,
            _ => 0,
        }
    }
}

impl From<prost::EncodeError> for WriteError {
    fn from(err: prost::EncodeError) -> Self {
        WriteError::Encoding(err.to_string())
    }
}

impl From<snap::Error> for WriteError {
    fn from(err: snap::Error) -> Self {
        WriteError::Encoding(err.to_string())
    }
}
