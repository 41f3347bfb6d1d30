use reqwest::StatusCode;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum IgError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upstream error with status {status}: {message}")]
    UpstreamStatus { status: StatusCode, message: String },

    #[error("Endpoint returned failure: {message}")]
    Endpoint { message: String },

    #[error("Cannot connect to settings database: {0}")]
    SettingsConnect(String),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Invalid settings table name: {0:?}")]
    InvalidTableName(String),

    #[error("Unknown setting key: {0:?}")]
    UnknownSettingKey(String),

    #[error("Invalid value for setting {key}: {value:?}")]
    InvalidSettingValue { key: &'static str, value: String },

    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl IgError {
    /// True for failures raised before anything left the process.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IgError::InvalidArgument(_)
                | IgError::InvalidTableName(_)
                | IgError::UnknownSettingKey(_)
                | IgError::InvalidSettingValue { .. }
        )
    }

    /// HTTP status reported by the upstream service, when there was one.
    pub fn upstream_status(&self) -> Option<StatusCode> {
        match self {
            IgError::UpstreamStatus { status, .. } => Some(*status),
            IgError::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}

impl From<figment::Error> for IgError {
    fn from(e: figment::Error) -> Self {
        IgError::Config(Box::new(e))
    }
}

