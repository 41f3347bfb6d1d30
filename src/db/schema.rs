//! SQL DDL for the settings table.
//! The table name is configurable, so the DDL is a template.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - one nullable column per `SettingKey`
/// - `username` UNIQUE
/// - `date` stamped on insert, `last_login` defaulting to 0
const SETTINGS_TABLE_TEMPLATE: &str = r#"
CREATE TABLE {table} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NULL DEFAULT NULL UNIQUE,
    username_id BIGINT NULL DEFAULT NULL,
    devicestring TEXT NULL DEFAULT NULL,
    device_id TEXT NULL DEFAULT NULL,
    phone_id TEXT NULL DEFAULT NULL,
    uuid TEXT NULL DEFAULT NULL,
    token TEXT NULL DEFAULT NULL,
    cookies TEXT NULL,
    date TIMESTAMP NULL DEFAULT CURRENT_TIMESTAMP,
    last_login BIGINT NULL DEFAULT 0
)
"#;

pub const TABLE_EXISTS: &str = "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?";

/// True when `name` can be spliced into SQL as an identifier.
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `CREATE TABLE` for `table`. The name must pass [`is_valid_table_name`].
pub fn create_table_sql(table: &str) -> String {
    SETTINGS_TABLE_TEMPLATE.replace("{table}", table)
}

