use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("tool '{0}' not found")]
    ToolNotFound(String),

    #[error("invalid sort mode '{0}'")]
    InvalidSort(String),

    #[error("unknown category '{0}'")]
    InvalidCategory(String),

    #[error("not signed in")]
    Unauthenticated,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HubError>;
