use crate::db::{SettingKey, SettingsStore};
use crate::error::IgError;

/// Identity of an authenticated caller, attached to every account call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Numeric account id, sent as `_uid`.
    pub user_id: String,
    /// Device UUID, sent as `_uuid`.
    pub uuid: String,
    pub device_id: String,
    pub phone_id: String,
    pub username: String,
    pub auth_token: Option<String>,
    pub csrf_token: String,
}

/// `csrftoken` value from a stored `name=value; name=value` cookie string.
pub fn csrf_token_from_cookies(cookies: &str) -> Option<&str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == "csrftoken")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

impl Session {
    /// Rebuild the session identity persisted by a previous login.
    pub fn from_settings<S: SettingsStore>(
        store: &S,
        csrf_token: impl Into<String>,
    ) -> Result<Self, IgError> {
        let required = |key: SettingKey| {
            store
                .value(key)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(IgError::MissingSetting(key.column()))
        };

        Ok(Self {
            user_id: required(SettingKey::UsernameId)?,
            uuid: required(SettingKey::Uuid)?,
            device_id: required(SettingKey::DeviceId)?,
            phone_id: required(SettingKey::PhoneId)?,
            username: store.username().to_string(),
            auth_token: store.value(SettingKey::Token).map(str::to_string),
            csrf_token: csrf_token.into(),
        })
    }
}
