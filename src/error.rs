use thiserror::Error;

#[derive(Error, Debug)]
pub enum TesseraError {
    #[error("ticket '{0}' not found")]
    TicketNotFound(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid ticket type '{0}'")]
    InvalidType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TesseraError>;
