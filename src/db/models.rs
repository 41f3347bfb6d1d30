use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::IgError;

/// Keys that `set` refuses without signalling an error.
pub const RESERVED_KEYS: [&str; 2] = ["sets", "username"];

/// Storage type of a settings column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
}

/// The fixed set of columns a settings row carries, `id` aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SettingKey {
    Username,
    UsernameId,
    DeviceString,
    DeviceId,
    PhoneId,
    Uuid,
    Token,
    Cookies,
    Date,
    LastLogin,
}

impl SettingKey {
    pub const ALL: [SettingKey; 10] = [
        SettingKey::Username,
        SettingKey::UsernameId,
        SettingKey::DeviceString,
        SettingKey::DeviceId,
        SettingKey::PhoneId,
        SettingKey::Uuid,
        SettingKey::Token,
        SettingKey::Cookies,
        SettingKey::Date,
        SettingKey::LastLogin,
    ];

    pub fn column(self) -> &'static str {
        match self {
            SettingKey::Username => "username",
            SettingKey::UsernameId => "username_id",
            SettingKey::DeviceString => "devicestring",
            SettingKey::DeviceId => "device_id",
            SettingKey::PhoneId => "phone_id",
            SettingKey::Uuid => "uuid",
            SettingKey::Token => "token",
            SettingKey::Cookies => "cookies",
            SettingKey::Date => "date",
            SettingKey::LastLogin => "last_login",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            SettingKey::UsernameId | SettingKey::LastLogin => ColumnKind::Integer,
            _ => ColumnKind::Text,
        }
    }

    /// Reject values an integer column cannot hold.
    pub fn check_value(self, value: &str) -> Result<(), IgError> {
        if self.kind() == ColumnKind::Integer && value.parse::<i64>().is_err() {
            return Err(IgError::InvalidSettingValue {
                key: self.column(),
                value: value.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SettingKey {
    type Err = IgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.column() == s)
            .ok_or_else(|| IgError::UnknownSettingKey(s.to_string()))
    }
}

/// In-memory copy of one settings row. NULL columns are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsMap(BTreeMap<SettingKey, String>);

impl SettingsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SettingKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn insert(&mut self, key: SettingKey, value: impl Into<String>) -> Option<String> {
        self.0.insert(key, value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether the row behind a store exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Unsaved,
    Saved(i64),
}

impl RowState {
    pub fn id(self) -> Option<i64> {
        match self {
            RowState::Unsaved => None,
            RowState::Saved(id) => Some(id),
        }
    }
}

/// Result of a settings lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting<'a> {
    /// The whole map, returned for the `sets` key.
    Sets(&'a SettingsMap),
    Id(i64),
    Value(&'a str),
}

impl<'a> Setting<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Setting::Value(v) => Some(v),
            _ => None,
        }
    }
}
