//! Settings persistence: session state kept per username.
//!
//! Layout:
//! - `models.rs`: setting keys, the in-memory row and its save state
//! - `schema.rs`: SQL DDL for the settings table (SQLite)
//! - `traits.rs`: the `SettingsStore` seam
//! - `sqlite.rs`: `SettingsStorage`, the SQLite-backed store

pub mod models;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use models::{RowState, Setting, SettingKey, SettingsMap};
pub use sqlite::{SettingsStorage, SqlitePool, StorageConnection, StorageOptions};
pub use traits::SettingsStore;
