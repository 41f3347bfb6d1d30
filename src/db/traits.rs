use std::future::Future;

use crate::db::models::{Setting, SettingKey, SettingsMap};
use crate::error::IgError;

/// Durable key/value settings for one username.
///
/// Implementations provide the storage; lookup and the login heuristic
/// are shared.
pub trait SettingsStore {
    /// The username these settings belong to.
    fn username(&self) -> &str;

    fn sets(&self) -> &SettingsMap;

    /// Row id, once the row exists.
    fn row_id(&self) -> Option<i64>;

    /// Write `value` under `key` and persist immediately.
    ///
    /// `sets` and `username` are ignored. Each call is one full save.
    fn set(
        &mut self,
        key: &str,
        value: impl Into<String> + Send,
    ) -> impl Future<Output = Result<(), IgError>> + Send;

    /// Persist every present key.
    fn save(&mut self) -> impl Future<Output = Result<(), IgError>> + Send;

    fn value(&self, key: SettingKey) -> Option<&str> {
        self.sets().get(key)
    }

    /// Look up `key`, falling back to `default` when it is unset.
    ///
    /// `sets` returns the whole map and `id` the row id.
    fn get<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<Setting<'a>> {
        let found = match key {
            "sets" => return Some(Setting::Sets(self.sets())),
            "id" => self.row_id().map(Setting::Id),
            _ => key
                .parse::<SettingKey>()
                .ok()
                .and_then(|k| self.value(k))
                .map(Setting::Value),
        };
        found.or(default.map(Setting::Value))
    }

    /// Best guess at whether a stored login exists.
    ///
    /// The token may have expired server-side; that cannot be seen from here.
    fn maybe_logged_in(&self) -> bool {
        let present = |key: SettingKey| self.value(key).is_some_and(|v| !v.is_empty() && v != "0");
        self.row_id().is_some() && present(SettingKey::UsernameId) && present(SettingKey::Token)
    }
}
