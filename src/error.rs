use thiserror::Error;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum KudosError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("no account recorded for user: {0}")]
    UnknownUser(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KudosError>;
