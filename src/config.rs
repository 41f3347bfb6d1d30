use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

use crate::error::IgError;

/// Prefix for every environment variable read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "IGAPI_";

pub const DEFAULT_SETTINGS_TABLE: &str = "user_settings";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL every endpoint path is joined onto. Must end with `/`.
    pub api_url: String,
    pub user_agent: String,
    pub proxy: Option<Url>,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    pub database_url: String,
    pub settings_table: String,
    pub loglevel: String,
    /// Account whose stored settings the binary opens.
    pub username: Option<String>,
    /// Overrides the `csrftoken` found in the stored cookies.
    pub csrf_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://i.instagram.com/api/v1/".to_string(),
            user_agent: "Instagram 27.0.0.7.97 Android (23/6.0.1; 640dpi; 1440x2392; LGE/lge; RS988; h1; h1; en_US)"
                .to_string(),
            proxy: None,
            connect_timeout_secs: 5,
            timeout_secs: 15,
            database_url: "sqlite:igapi.sqlite".to_string(),
            settings_table: DEFAULT_SETTINGS_TABLE.to_string(),
            loglevel: "info".to_string(),
            username: None,
            csrf_token: None,
        }
    }
}

impl Config {
    /// Defaults overlaid with `IGAPI_*` environment variables.
    pub fn from_env() -> Result<Self, IgError> {
        Self::figment().extract().map_err(IgError::from)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().unwrap_or_else(|e| panic!("FATAL: invalid configuration: {e}"))
});

