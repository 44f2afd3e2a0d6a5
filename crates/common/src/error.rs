/// Errors raised while building or checking a signed message or playback URL.
///
/// Every variant is a local precondition failure: nothing is sent over the
/// wire when signing fails, and none of these are worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// The request body could not be turned into a JSON object.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The owner id or secret key is empty.
    #[error("missing credentials: {0} is empty")]
    MissingCredentials(&'static str),

    /// A required identifier for URL signing is empty.
    #[error("format error: {0} must not be empty")]
    Format(&'static str),

    /// A signed message or query could not be parsed back.
    #[error("malformed signed data: {0}")]
    Malformed(String),

    /// The signature does not match the signed bytes.
    #[error("signature does not match")]
    SignatureMismatch,
}

impl From<serde_json::Error> for SignError {
    fn from(e: serde_json::Error) -> Self {
        SignError::Encoding(e.to_string())
    }
}
