use crate::config::{Config, DEFAULT_SETTINGS_TABLE};
use crate::db::models::{ColumnKind, RESERVED_KEYS, RowState, SettingKey, SettingsMap};
use crate::db::schema::{TABLE_EXISTS, create_table_sql, is_valid_table_name};
use crate::db::traits::SettingsStore;
use crate::error::IgError;
use chrono::{NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

#[derive(Debug, Clone)]
pub enum StorageConnection {
    /// Open a dedicated single-connection pool.
    Url(String),
    /// Reuse a pool the caller already holds.
    Pool(SqlitePool),
}

#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub connection: StorageConnection,
    pub table_name: String,
}

impl StorageOptions {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            connection: StorageConnection::Url(url.into()),
            table_name: DEFAULT_SETTINGS_TABLE.to_string(),
        }
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            connection: StorageConnection::Pool(pool),
            table_name: DEFAULT_SETTINGS_TABLE.to_string(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::from_url(cfg.database_url.clone()).with_table_name(cfg.settings_table.clone())
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }
}

/// Text columns are read back through `CAST`. `date` has NUMERIC affinity and
/// may hold an INTEGER or REAL.
fn select_column(key: SettingKey) -> String {
    let column = key.column();
    match key.kind() {
        ColumnKind::Text => format!("CAST({column} AS TEXT) AS {column}"),
        ColumnKind::Integer => column.to_string(),
    }
}

enum BindValue<'a> {
    Text(&'a str),
    Int(i64),
}

/// Settings for one username, kept as a single row of the settings table.
///
/// The row is loaded once when the store is opened; reads are served from
/// memory afterwards.
pub struct SettingsStorage {
    pool: SqlitePool,
    table: String,
    username: String,
    sets: SettingsMap,
    row: RowState,
}

impl SettingsStorage {
    /// Connect, create the table if it is missing, and load the row for `username`.
    pub async fn open(
        username: impl Into<String>,
        options: StorageOptions,
    ) -> Result<Self, IgError> {
        if !is_valid_table_name(&options.table_name) {
            return Err(IgError::InvalidTableName(options.table_name));
        }

        let pool = match options.connection {
            StorageConnection::Pool(pool) => pool,
            StorageConnection::Url(url) => Self::connect(&url).await?,
        };

        let mut storage = Self {
            pool,
            table: options.table_name,
            username: username.into(),
            sets: SettingsMap::new(),
            row: RowState::Unsaved,
        };
        storage.provision().await?;
        storage.populate().await?;
        Ok(storage)
    }

    async fn connect(url: &str) -> Result<SqlitePool, IgError> {
        let connect_opts = SqliteConnectOptions::from_str(url)
            .map_err(|e| IgError::SettingsConnect(e.to_string()))?
            .create_if_missing(true);
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await
            .map_err(|e| IgError::SettingsConnect(e.to_string()))
    }

    /// Create the settings table unless it already exists. Returns whether it was created.
    async fn provision(&self) -> Result<bool, IgError> {
        let existing: Option<String> = sqlx::query_scalar(TABLE_EXISTS)
            .bind(&self.table)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            debug!(table = %self.table, "settings table present");
            return Ok(false);
        }

        sqlx::query(&create_table_sql(&self.table))
            .execute(&self.pool)
            .await?;
        info!(table = %self.table, "created settings table");
        Ok(true)
    }

    async fn populate(&mut self) -> Result<(), IgError> {
        let columns = SettingKey::ALL.map(select_column).join(", ");
        let sql = format!(
            "SELECT id, {columns} FROM {} WHERE username = ?",
            self.table
        );
        let row = sqlx::query(&sql)
            .bind(&self.username)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            self.row = RowState::Saved(row.try_get("id")?);
            for key in SettingKey::ALL {
                if let Some(value) = Self::read_column(&row, key)? {
                    self.sets.insert(key, value);
                }
            }
            debug!(
                username = %self.username,
                id = ?self.row.id(),
                "loaded stored settings"
            );
        }
        Ok(())
    }

    fn read_column(row: &SqliteRow, key: SettingKey) -> Result<Option<String>, IgError> {
        let value = match key.kind() {
            ColumnKind::Integer => row
                .try_get::<Option<i64>, _>(key.column())?
                .map(|n| n.to_string()),
            ColumnKind::Text => row.try_get::<Option<String>, _>(key.column())?,
        };
        Ok(value)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn row_state(&self) -> RowState {
        self.row
    }

    /// Creation time of the row, from the `date` column.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.sets
            .get(SettingKey::Date)
            .and_then(|d| NaiveDateTime::parse_from_str(d, "%Y-%m-%d %H:%M:%S").ok())
    }

    /// Stamp `last_login` with the current unix time.
    pub async fn record_login(&mut self) -> Result<(), IgError> {
        self.set("last_login", Utc::now().timestamp().to_string())
            .await
    }
}

impl SettingsStore for SettingsStorage {
    fn username(&self) -> &str {
        &self.username
    }

    fn sets(&self) -> &SettingsMap {
        &self.sets
    }

    fn row_id(&self) -> Option<i64> {
        self.row.id()
    }

    async fn set(&mut self, key: &str, value: impl Into<String> + Send) -> Result<(), IgError> {
        if RESERVED_KEYS.contains(&key) {
            debug!(key, "ignoring write to reserved settings key");
            return Ok(());
        }

        let setting: SettingKey = key.parse()?;
        let value = value.into();
        setting.check_value(&value)?;
        self.sets.insert(setting, value);
        self.save().await
    }

    /// Insert the row on first save, update it by id afterwards.
    async fn save(&mut self) -> Result<(), IgError> {
        self.sets
            .insert(SettingKey::Username, self.username.clone());

        let mut binds = Vec::with_capacity(self.sets.len());
        let mut columns = Vec::with_capacity(self.sets.len());
        for (key, value) in self.sets.iter() {
            let bind = match key.kind() {
                ColumnKind::Text => BindValue::Text(value),
                ColumnKind::Integer => BindValue::Int(value.parse().map_err(|_| {
                    IgError::InvalidSettingValue {
                        key: key.column(),
                        value: value.to_string(),
                    }
                })?),
            };
            columns.push(key.column());
            binds.push(bind);
        }

        let sql = match self.row {
            RowState::Unsaved => format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table,
                columns.join(", "),
                vec!["?"; columns.len()].join(", ")
            ),
            RowState::Saved(_) => format!(
                "UPDATE {} SET {} WHERE id = ?",
                self.table,
                columns
                    .iter()
                    .map(|c| format!("{c} = ?"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };

        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = match bind {
                BindValue::Text(s) => query.bind(s),
                BindValue::Int(i) => query.bind(i),
            };
        }
        if let RowState::Saved(id) = self.row {
            query = query.bind(id);
        }
        let result = query.execute(&self.pool).await?;

        if self.row == RowState::Unsaved {
            let id = result.last_insert_rowid();
            self.row = RowState::Saved(id);
            info!(username = %self.username, id, "inserted settings row");
        }
        Ok(())
    }
}
