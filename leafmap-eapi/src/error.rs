use thiserror::Error;

#[derive(Error, Debug)]
pub enum EapiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication rejected by {host} (HTTP {status})")]
    AuthFailed { host: String, status: u16 },

    #[error("eAPI rejected command: {message} (code {code})")]
    Command { code: i64, message: String },

    #[error("invalid eAPI endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("unexpected eAPI response: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, EapiError>;
