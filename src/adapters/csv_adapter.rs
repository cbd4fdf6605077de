//! CSV file stores for trades, notes and trade plans.
//!
//! Each collection lives in its own file with a header line. Trade rows
//! with an empty `profit_loss` column are treated as freshly entered and
//! have their P&L booked on load; rows that carry a value are taken as-is.

use crate::domain::error::JournalError;
use crate::domain::note::{join_trade_ids, split_trade_ids, NewNote, Note};
use crate::domain::plan::{NewPlan, PlanStatus, TradePlan};
use crate::domain::trade::{format_timestamp, parse_timestamp, Direction, NewTrade, Trade};
use crate::ports::note_port::NoteStore;
use crate::ports::plan_port::PlanStore;
use crate::ports::trade_port::TradeStore;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TradeRecord {
    id: String,
    symbol: String,
    direction: String,
    quantity: u32,
    entry_price: f64,
    exit_price: f64,
    timestamp: String,
    profit_loss: Option<f64>,
    fees: Option<f64>,
    notes: Option<String>,
}

impl TradeRecord {
    fn from_trade(trade: &Trade) -> Self {
        Self {
            id: trade.id.clone(),
            symbol: trade.symbol.clone(),
            direction: trade.direction.to_string(),
            quantity: trade.quantity,
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            timestamp: format_timestamp(&trade.timestamp),
            profit_loss: Some(trade.profit_loss),
            fees: trade.fees,
            notes: trade.notes.clone(),
        }
    }

    fn into_trade(self) -> Result<Trade, JournalError> {
        let direction: Direction = self
            .direction
            .parse()
            .map_err(|reason: String| JournalError::invalid_trade(&self.id, reason))?;
        let timestamp = parse_timestamp(&self.id, &self.timestamp)?;

        let stored_pnl = self.profit_loss;
        let mut trade = NewTrade {
            symbol: self.symbol,
            direction,
            quantity: self.quantity,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            timestamp,
            fees: self.fees,
            notes: self.notes,
        }
        .into_trade(self.id)?;

        if let Some(pnl) = stored_pnl {
            if !pnl.is_finite() {
                return Err(JournalError::invalid_trade(
                    &trade.id,
                    "profit_loss must be a finite number",
                ));
            }
            trade.profit_loss = pnl;
        }
        Ok(trade)
    }
}

pub struct CsvTradeStore {
    path: PathBuf,
}

impl CsvTradeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse trades from CSV text, rejecting duplicate ids.
    pub fn parse(content: &str) -> Result<Vec<Trade>, JournalError> {
        read_trades(csv::Reader::from_reader(content.as_bytes()))
    }

    /// Render trades as CSV text with a header row.
    pub fn render(trades: &[Trade]) -> Result<String, JournalError> {
        render_records(trades.iter().map(TradeRecord::from_trade))
    }
}

fn render_records<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<String, JournalError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| JournalError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| JournalError::Storage {
        reason: format!("CSV output is not UTF-8: {e}"),
    })
}

/// Missing files read as empty.
fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, JournalError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut rdr = csv::Reader::from_path(path)?;
    let records = rdr.deserialize().collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(records)
}

fn write_file(path: &Path, content: String) -> Result<(), JournalError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn read_trades<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Trade>, JournalError> {
    let mut seen = HashSet::new();
    let mut trades = Vec::new();
    for result in rdr.deserialize::<TradeRecord>() {
        let trade = result?.into_trade()?;
        if !seen.insert(trade.id.clone()) {
            return Err(JournalError::invalid_trade(&trade.id, "duplicate trade id"));
        }
        trades.push(trade);
    }
    Ok(trades)
}

impl TradeStore for CsvTradeStore {
    fn load_trades(&self) -> Result<Vec<Trade>, JournalError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "trade file missing, starting empty");
            return Ok(Vec::new());
        }
        let rdr = csv::Reader::from_path(&self.path)?;
        let trades = read_trades(rdr)?;
        tracing::debug!(path = %self.path.display(), count = trades.len(), "loaded trades");
        Ok(trades)
    }

    fn append_trade(&self, trade: &Trade) -> Result<(), JournalError> {
        let mut trades = self.load_trades()?;
        if trades.iter().any(|t| t.id == trade.id) {
            return Err(JournalError::invalid_trade(&trade.id, "duplicate trade id"));
        }
        trades.push(trade.clone());
        self.replace_all(&trades)
    }

    fn replace_all(&self, trades: &[Trade]) -> Result<(), JournalError> {
        write_file(&self.path, Self::render(trades)?)?;
        tracing::debug!(path = %self.path.display(), count = trades.len(), "wrote trades");
        Ok(())
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[derive(Debug, Serialize, Deserialize)]
struct NoteRecord {
    id: String,
    title: String,
    content: String,
    date: String,
    trade_ids: String,
}

impl NoteRecord {
    fn from_note(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            date: note.date.to_string(),
            trade_ids: join_trade_ids(&note.trade_ids),
        }
    }

    fn into_note(self) -> Result<Note, JournalError> {
        let date = parse_date(&self.date).ok_or_else(|| {
            JournalError::invalid_note(&self.id, format!("unparseable date {:?}", self.date))
        })?;
        NewNote {
            title: self.title,
            content: self.content,
            date,
            trade_ids: split_trade_ids(&self.trade_ids),
        }
        .into_note(self.id)
    }
}

/// Notes file: `id,title,content,date,trade_ids` with trade ids joined by `;`.
pub struct CsvNoteStore {
    path: PathBuf,
}

impl CsvNoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NoteStore for CsvNoteStore {
    fn load_notes(&self) -> Result<Vec<Note>, JournalError> {
        load_records::<NoteRecord>(&self.path)?
            .into_iter()
            .map(NoteRecord::into_note)
            .collect()
    }

    fn save_notes(&self, notes: &[Note]) -> Result<(), JournalError> {
        write_file(&self.path, render_records(notes.iter().map(NoteRecord::from_note))?)?;
        tracing::debug!(path = %self.path.display(), count = notes.len(), "wrote notes");
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PlanRecord {
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

impl PlanRecord {
    fn from_plan(plan: &TradePlan) -> Self {
        Self {
            id: plan.id.clone(),
            symbol: plan.symbol.clone(),
            entry_price: plan.entry_price,
            target_price: plan.target_price,
            stop_loss: plan.stop_loss,
            quantity: plan.quantity,
            strategy: plan.strategy.clone(),
            notes: plan.notes.clone(),
            status: plan.status.to_string(),
            date: plan.date.to_string(),
        }
    }

    fn into_plan(self) -> Result<TradePlan, JournalError> {
        let status: PlanStatus = self
            .status
            .parse()
            .map_err(|reason: String| JournalError::invalid_plan(&self.id, reason))?;
        let date = parse_date(&self.date).ok_or_else(|| {
            JournalError::invalid_plan(&self.id, format!("unparseable date {:?}", self.date))
        })?;
        let mut plan = NewPlan {
            symbol: self.symbol,
            entry_price: self.entry_price,
            target_price: self.target_price,
            stop_loss: self.stop_loss,
            quantity: self.quantity,
            strategy: self.strategy,
            notes: self.notes,
        }
        .into_plan(self.id, date)?;
        plan.status = status;
        Ok(plan)
    }
}

pub struct CsvPlanStore {
    path: PathBuf,
}

impl CsvPlanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlanStore for CsvPlanStore {
    fn load_plans(&self) -> Result<Vec<TradePlan>, JournalError> {
        load_records::<PlanRecord>(&self.path)?
            .into_iter()
            .map(PlanRecord::into_plan)
            .collect()
    }

    fn save_plans(&self, plans: &[TradePlan]) -> Result<(), JournalError> {
        write_file(&self.path, render_records(plans.iter().map(PlanRecord::from_plan))?)?;
        tracing::debug!(path = %self.path.display(), count = plans.len(), "wrote plans");
        Ok(())
    }
}
