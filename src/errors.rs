use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("booking API returned {status}{}", suffix(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// The human-readable message the backend attached to a rejection, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}
