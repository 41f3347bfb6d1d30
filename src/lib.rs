pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod types;

pub use api::{HttpTransport, IgClient, Session, Transport};
pub use db::{SettingsStorage, SettingsStore, StorageOptions};
pub use error::IgError;
