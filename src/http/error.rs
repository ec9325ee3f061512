use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never completed (connect, timeout, decode).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status. The message is taken
    /// from the response body when it has one.
    #[error("{message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    pub fn status(status: u16, body: String) -> Self {
        let message = if body.trim().is_empty() {
            format!("Request failed with status {status}")
        } else {
            body
        };
        Self::Status { status, message }
    }
}
