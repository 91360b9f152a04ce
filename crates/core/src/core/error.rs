use thiserror::Error;

/// Failure talking to the waitlist backend.
///
/// Every variant is non-fatal: callers log it and leave the UI where it was.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("backend URL is empty")]
    EmptyUrl,

    #[error("backend URL must start with http:// or https://, got {0:?}")]
    UnsupportedScheme(String),

    #[error("invalid field config: {0}")]
    InvalidField(String),

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("framebuffer was released")]
    Released,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
