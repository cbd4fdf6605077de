//! SQLite journal store: trades, notes and trade plans in one database.

use crate::domain::error::JournalError;
use crate::domain::note::{join_trade_ids, split_trade_ids, Note};
use crate::domain::plan::{PlanStatus, TradePlan};
use crate::domain::trade::{format_timestamp, parse_timestamp, Direction, Trade};
use crate::ports::note_port::NoteStore;
use crate::ports::plan_port::PlanStore;
use crate::ports::trade_port::TradeStore;
use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS trades (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        symbol TEXT NOT NULL,
        direction TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        entry_price REAL NOT NULL,
        exit_price REAL NOT NULL,
        timestamp TEXT NOT NULL,
        profit_loss REAL NOT NULL,
        fees REAL,
        notes TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_trades_timestamp ON trades(timestamp);
    CREATE INDEX IF NOT EXISTS idx_trades_symbol ON trades(symbol);
    CREATE TABLE IF NOT EXISTS notes (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        date TEXT NOT NULL,
        trade_ids TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS plans (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        symbol TEXT NOT NULL,
        entry_price REAL NOT NULL,
        target_price REAL NOT NULL,
        stop_loss REAL NOT NULL,
        quantity INTEGER NOT NULL,
        strategy TEXT NOT NULL,
        notes TEXT,
        status TEXT NOT NULL,
        date TEXT NOT NULL
    );";

const INSERT: &str = "INSERT INTO trades
        (id, symbol, direction, quantity, entry_price, exit_price, timestamp, profit_loss, fees, notes)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

fn db_err(e: r2d2::Error) -> JournalError {
    JournalError::Storage {
        reason: e.to_string(),
    }
}

fn query_err(e: rusqlite::Error) -> JournalError {
    JournalError::StorageQuery {
        reason: e.to_string(),
    }
}

pub struct SqliteJournalStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteJournalStore {
    pub fn open(path: &str, pool_size: u32) -> Result<Self, JournalError> {
        if pool_size == 0 {
            return Err(JournalError::Storage {
                reason: "sqlite pool_size must be at least 1".to_string(),
            });
        }
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(db_err)?;
        let store = Self { pool };
        store.initialize_schema()?;
        tracing::debug!(path, pool_size, "opened sqlite journal store");
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, JournalError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager).map_err(db_err)?;
        let store = Self { pool };
        store.initialize_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, JournalError> {
        self.pool.get().map_err(db_err)
    }

    fn initialize_schema(&self) -> Result<(), JournalError> {
        self.conn()?.execute_batch(SCHEMA).map_err(query_err)
    }
}

fn insert(conn: &Connection, trade: &Trade) -> Result<(), JournalError> {
    conn.execute(
        INSERT,
        params![
            trade.id,
            trade.symbol,
            trade.direction.to_string(),
            trade.quantity,
            trade.entry_price,
            trade.exit_price,
            format_timestamp(&trade.timestamp),
            trade.profit_loss,
            trade.fees,
            trade.notes,
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            JournalError::invalid_trade(&trade.id, "duplicate trade id")
        }
        other => query_err(other),
    })?;
    Ok(())
}

struct TradeRow {
    id: String,
    symbol: String,
    direction: String,
    quantity: u32,
    entry_price: f64,
    exit_price: f64,
    timestamp: String,
    profit_loss: f64,
    fees: Option<f64>,
    notes: Option<String>,
}

impl TradeRow {
    fn into_trade(self) -> Result<Trade, JournalError> {
        let direction: Direction = self
            .direction
            .parse()
            .map_err(|reason: String| JournalError::invalid_trade(&self.id, reason))?;
        let timestamp = parse_timestamp(&self.id, &self.timestamp)?;
        Ok(Trade {
            id: self.id,
            symbol: self.symbol,
            direction,
            quantity: self.quantity,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            timestamp,
            profit_loss: self.profit_loss,
            fees: self.fees,
            notes: self.notes,
        })
    }
}

impl TradeStore for SqliteJournalStore {
    fn load_trades(&self) -> Result<Vec<Trade>, JournalError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, symbol, direction, quantity, entry_price, exit_price,
                        timestamp, profit_loss, fees, notes
                 FROM trades ORDER BY seq ASC",
            )
            .map_err(query_err)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(TradeRow {
                    id: row.get(0)?,
                    symbol: row.get(1)?,
                    direction: row.get(2)?,
                    quantity: row.get(3)?,
                    entry_price: row.get(4)?,
                    exit_price: row.get(5)?,
                    timestamp: row.get(6)?,
                    profit_loss: row.get(7)?,
                    fees: row.get(8)?,
                    notes: row.get(9)?,
                })
            })
            .map_err(query_err)?;

        let mut trades = Vec::new();
        for row in rows {
            trades.push(row.map_err(query_err)?.into_trade()?);
        }
        tracing::debug!(count = trades.len(), "loaded trades from sqlite");
        Ok(trades)
    }

    fn append_trade(&self, trade: &Trade) -> Result<(), JournalError> {
        let conn = self.conn()?;
        insert(&conn, trade)
    }

    fn replace_all(&self, trades: &[Trade]) -> Result<(), JournalError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_err)?;
        tx.execute("DELETE FROM trades", []).map_err(query_err)?;
        for trade in trades {
            insert(&tx, trade)?;
        }
        tx.commit().map_err(query_err)?;
        tracing::debug!(count = trades.len(), "replaced sqlite trades");
        Ok(())
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

impl NoteStore for SqliteJournalStore {
    fn load_notes(&self) -> Result<Vec<Note>, JournalError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id, title, content, date, trade_ids FROM notes ORDER BY seq ASC")
            .map_err(query_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .map_err(query_err)?;

        let mut notes = Vec::new();
        for row in rows {
            let (id, title, content, date, trade_ids) = row.map_err(query_err)?;
            notes.push(Note {
                date: parse_date(&date).ok_or_else(|| {
                    JournalError::invalid_note(&id, format!("unparseable date {date:?}"))
                })?,
                id,
                title,
                content,
                trade_ids: split_trade_ids(&trade_ids),
            });
        }
        Ok(notes)
    }

    fn save_notes(&self, notes: &[Note]) -> Result<(), JournalError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_err)?;
        tx.execute("DELETE FROM notes", []).map_err(query_err)?;
        for note in notes {
            tx.execute(
                "INSERT INTO notes (id, title, content, date, trade_ids) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    note.id,
                    note.title,
                    note.content,
                    note.date.to_string(),
                    join_trade_ids(&note.trade_ids),
                ],
            )
            .map_err(query_err)?;
        }
        tx.commit().map_err(query_err)?;
        tracing::debug!(count = notes.len(), "replaced sqlite notes");
        Ok(())
    }
}

struct PlanRow {
    id: String,
    symbol: String,
    entry_price: f64,
    target_price: f64,
    stop_loss: f64,
    quantity: u32,
    strategy: String,
    notes: Option<String>,
    status: String,
    date: String,
}

impl PlanRow {
    fn into_plan(self) -> Result<TradePlan, JournalError> {
        let status: PlanStatus = self
            .status
            .parse()
            .map_err(|reason: String| JournalError::invalid_plan(&self.id, reason))?;
        let date = parse_date(&self.date).ok_or_else(|| {
            JournalError::invalid_plan(&self.id, format!("unparseable date {:?}", self.date))
        })?;
        Ok(TradePlan {
            id: self.id,
            symbol: self.symbol,
            entry_price: self.entry_price,
            target_price: self.target_price,
            stop_loss: self.stop_loss,
            quantity: self.quantity,
            strategy: self.strategy,
            notes: self.notes,
            status,
            date,
        })
    }
}

impl PlanStore for SqliteJournalStore {
    fn load_plans(&self) -> Result<Vec<TradePlan>, JournalError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, symbol, entry_price, target_price, stop_loss, quantity,
                        strategy, notes, status, date
                 FROM plans ORDER BY seq ASC",
            )
            .map_err(query_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PlanRow {
                    id: row.get(0)?,
                    symbol: row.get(1)?,
                    entry_price: row.get(2)?,
                    target_price: row.get(3)?,
                    stop_loss: row.get(4)?,
                    quantity: row.get(5)?,
                    strategy: row.get(6)?,
                    notes: row.get(7)?,
                    status: row.get(8)?,
                    date: row.get(9)?,
                })
            })
            .map_err(query_err)?;

        let mut plans = Vec::new();
        for row in rows {
            plans.push(row.map_err(query_err)?.into_plan()?);
        }
        Ok(plans)
    }

    fn save_plans(&self, plans: &[TradePlan]) -> Result<(), JournalError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_err)?;
        tx.execute("DELETE FROM plans", []).map_err(query_err)?;
        for plan in plans {
            tx.execute(
                "INSERT INTO plans
                    (id, symbol, entry_price, target_price, stop_loss, quantity, strategy, notes, status, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    plan.id,
                    plan.symbol,
                    plan.entry_price,
                    plan.target_price,
                    plan.stop_loss,
                    plan.quantity,
                    plan.strategy,
                    plan.notes,
                    plan.status.to_string(),
                    plan.date.to_string(),
                ],
            )
            .map_err(query_err)?;
        }
        tx.commit().map_err(query_err)?;
        tracing::debug!(count = plans.len(), "replaced sqlite plans");
        Ok(())
    }
}
