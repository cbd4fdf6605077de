#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use tradejournal::domain::error::JournalError;
pub use tradejournal::domain::note::Note;
pub use tradejournal::domain::plan::TradePlan;
pub use tradejournal::domain::trade::{Direction, Trade};
use tradejournal::ports::note_port::NoteStore;
use tradejournal::ports::plan_port::PlanStore;
use tradejournal::ports::trade_port::TradeStore;

/// In-memory store; optionally fails every load.
pub struct MockTradeStore {
    pub trades: RefCell<Vec<Trade>>,
    pub load_error: Option<String>,
}

impl MockTradeStore {
    pub fn new() -> Self {
        Self {
            trades: RefCell::new(Vec::new()),
            load_error: None,
        }
    }

    pub fn with_trades(trades: Vec<Trade>) -> Self {
        Self {
            trades: RefCell::new(trades),
            load_error: None,
        }
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.load_error = Some(reason.to_string());
        self
    }

    pub fn snapshot(&self) -> Vec<Trade> {
        self.trades.borrow().clone()
    }
}

impl TradeStore for MockTradeStore {
    fn load_trades(&self) -> Result<Vec<Trade>, JournalError> {
        if let Some(reason) = &self.load_error {
            return Err(JournalError::Storage {
                reason: reason.clone(),
            });
        }
        Ok(self.snapshot())
    }

    fn append_trade(&self, trade: &Trade) -> Result<(), JournalError> {
        self.trades.borrow_mut().push(trade.clone());
        Ok(())
    }

    fn replace_all(&self, trades: &[Trade]) -> Result<(), JournalError> {
        *self.trades.borrow_mut() = trades.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct MockNoteStore {
    pub notes: RefCell<Vec<Note>>,
}

impl MockNoteStore {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: RefCell::new(notes),
        }
    }

    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.borrow().clone()
    }
}

impl NoteStore for MockNoteStore {
    fn load_notes(&self) -> Result<Vec<Note>, JournalError> {
        Ok(self.snapshot())
    }

    fn save_notes(&self, notes: &[Note]) -> Result<(), JournalError> {
        *self.notes.borrow_mut() = notes.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct MockPlanStore {
    pub plans: RefCell<Vec<TradePlan>>,
}

impl MockPlanStore {
    pub fn snapshot(&self) -> Vec<TradePlan> {
        self.plans.borrow().clone()
    }
}

impl PlanStore for MockPlanStore {
    fn load_plans(&self) -> Result<Vec<TradePlan>, JournalError> {
        Ok(self.snapshot())
    }

    fn save_plans(&self, plans: &[TradePlan]) -> Result<(), JournalError> {
        *self.plans.borrow_mut() = plans.to_vec();
        Ok(())
    }
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

/// A closed long trade with the given booked P&L.
pub fn make_trade(id: &str, symbol: &str, date: &str, profit_loss: f64) -> Trade {
    Trade {
        id: id.to_string(),
        symbol: symbol.to_string(),
        direction: Direction::Buy,
        quantity: 1,
        entry_price: 100.0,
        exit_price: 100.0 + profit_loss,
        timestamp: at(date, "10:00:00"),
        profit_loss,
        fees: None,
        notes: None,
    }
}

pub fn make_note(id: &str, date: &str, title: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: String::new(),
        date: day(date),
        trade_ids: Vec::new(),
    }
}

/// The AAPL / MSFT / TSLA journal over two consecutive days.
pub fn two_day_journal() -> Vec<Trade> {
    vec![
        make_trade("1", "AAPL", "2024-03-04", 36.0),
        make_trade("2", "MSFT", "2024-03-04", 23.5),
        make_trade("3", "TSLA", "2024-03-05", -58.8),
    ]
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
