//! SQLite position store adapter.

use crate::domain::error::TickerTrackError;
use crate::domain::position::{NewPosition, StrategyTag, TIMESTAMP_FORMAT, TrackedPosition};
use crate::ports::config_port::ConfigPort;
use crate::ports::position_store_port::PositionStorePort;
use chrono::NaiveDateTime;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

const DEFAULT_POOL_SIZE: i64 = 4;

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

fn db_err(e: r2d2::Error) -> TickerTrackError {
    TickerTrackError::Database {
        reason: e.to_string(),
    }
}

fn query_err(e: rusqlite::Error) -> TickerTrackError {
    TickerTrackError::DatabaseQuery {
        reason: e.to_string(),
    }
}

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TickerTrackError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| TickerTrackError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", DEFAULT_POOL_SIZE);
        let pool_size = u32::try_from(pool_size)
            .ok()
            .filter(|&size| size >= 1)
            .ok_or_else(|| TickerTrackError::ConfigInvalid {
                section: "sqlite".into(),
                key: "pool_size".into(),
                reason: format!("must be between 1 and {}", u32::MAX),
            })?;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(db_err)?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, TickerTrackError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager).map_err(db_err)?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, TickerTrackError> {
        self.pool.get().map_err(db_err)
    }

    pub fn initialize_schema(&self) -> Result<(), TickerTrackError> {
        self.conn()?
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS positions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    ticker TEXT NOT NULL,
                    strategy TEXT NOT NULL,
                    entry_price REAL NOT NULL,
                    current_price REAL,
                    daily_change REAL,
                    added_at TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_positions_ticker ON positions(ticker);",
            )
            .map_err(query_err)
    }
}

fn row_to_position(row: &rusqlite::Row<'_>) -> rusqlite::Result<TrackedPosition> {
    let strategy_str: String = row.get(2)?;
    let strategy = strategy_str.parse::<StrategyTag>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let added_str: String = row.get(6)?;
    let added_at = NaiveDateTime::parse_from_str(&added_str, TIMESTAMP_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(TrackedPosition {
        id: row.get(0)?,
        ticker: row.get(1)?,
        strategy,
        entry_price: row.get(3)?,
        current_price: row.get(4)?,
        daily_change: row.get(5)?,
        added_at,
    })
}

impl PositionStorePort for SqliteAdapter {
    fn insert(&self, position: &NewPosition) -> Result<TrackedPosition, TickerTrackError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO positions (ticker, strategy, entry_price, current_price, daily_change, added_at)
             VALUES (?1, ?2, ?3, ?3, ?4, ?5)",
            params![
                position.ticker,
                position.strategy.as_str(),
                position.entry_price,
                position.daily_change,
                position.added_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )
        .map_err(query_err)?;

        Ok(TrackedPosition {
            id: conn.last_insert_rowid(),
            ticker: position.ticker.clone(),
            strategy: position.strategy,
            entry_price: position.entry_price,
            current_price: Some(position.entry_price),
            daily_change: Some(position.daily_change),
            added_at: position.added_at,
        })
    }

    fn list(&self) -> Result<Vec<TrackedPosition>, TickerTrackError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, ticker, strategy, entry_price, current_price, daily_change, added_at
                 FROM positions
                 ORDER BY id ASC",
            )
            .map_err(query_err)?;

        let rows = stmt.query_map([], row_to_position).map_err(query_err)?;

        let mut positions = Vec::new();
        for row in rows {
            positions.push(row.map_err(query_err)?);
        }
        Ok(positions)
    }

    fn delete(&self, id: i64) -> Result<bool, TickerTrackError> {
        let deleted = self
            .conn()?
            .execute("DELETE FROM positions WHERE id = ?1", params![id])
            .map_err(query_err)?;
        Ok(deleted > 0)
    }

    fn update_quote(
        &self,
        id: i64,
        current_price: f64,
        daily_change: f64,
    ) -> Result<(), TickerTrackError> {
        let updated = self
            .conn()?
            .execute(
                "UPDATE positions SET current_price = ?1, daily_change = ?2 WHERE id = ?3",
                params![current_price, daily_change, id],
            )
            .map_err(query_err)?;
        if updated == 0 {
            return Err(TickerTrackError::PositionNotFound { id });
        }
        Ok(())
    }
}
