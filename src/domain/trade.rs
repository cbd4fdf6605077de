//! Trade records and trade creation.
//!
//! `profit_loss` is computed once, when a [`NewTrade`] becomes a [`Trade`].
//! Everything downstream treats the stored value as ground truth.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

use super::error::JournalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Buy,
    Sell,
    Short,
    Cover,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Buy,
        Direction::Sell,
        Direction::Short,
        Direction::Cover,
    ];

    /// Sign applied to `exit - entry` when computing P&L.
    fn pnl_sign(self) -> f64 {
        match self {
            Direction::Buy | Direction::Cover => 1.0,
            Direction::Sell | Direction::Short => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Buy => "Buy",
            Direction::Sell => "Sell",
            Direction::Short => "Short",
            Direction::Cover => "Cover",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Direction::Buy),
            "sell" => Ok(Direction::Sell),
            "short" => Ok(Direction::Short),
            "cover" => Ok(Direction::Cover),
            other => Err(format!(
                "unknown direction '{other}' (expected buy, sell, short or cover)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub direction: Direction,
    pub quantity: u32,
    pub entry_price: f64,
    pub exit_price: f64,
    pub timestamp: NaiveDateTime,
    pub profit_loss: f64,
    pub fees: Option<f64>,
    pub notes: Option<String>,
}

impl Trade {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn is_win(&self) -> bool {
        self.profit_loss > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.profit_loss < 0.0
    }
}

/// Trade as entered by the user, before an id is assigned and P&L is booked.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrade {
    pub symbol: String,
    pub direction: Direction,
    pub quantity: u32,
    pub entry_price: f64,
    pub exit_price: f64,
    pub timestamp: NaiveDateTime,
    pub fees: Option<f64>,
    pub notes: Option<String>,
}

impl NewTrade {
    pub fn profit_loss(&self) -> f64 {
        self.direction.pnl_sign() * (self.exit_price - self.entry_price) * self.quantity as f64
    }

    pub fn into_trade(self, id: impl Into<String>) -> Result<Trade, JournalError> {
        let id = id.into();
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(JournalError::invalid_trade(&id, "symbol must not be empty"));
        }
        if self.quantity == 0 {
            return Err(JournalError::invalid_trade(&id, "quantity must be positive"));
        }
        for (name, price) in [("entry_price", self.entry_price), ("exit_price", self.exit_price)] {
            if !price.is_finite() || price < 0.0 {
                return Err(JournalError::invalid_trade(
                    &id,
                    format!("{name} must be a non-negative number"),
                ));
            }
        }

        if self.fees.is_some_and(|f| !f.is_finite() || f < 0.0) {
            return Err(JournalError::invalid_trade(&id, "fees must be a non-negative number"));
        }

        let profit_loss = self.profit_loss();
        Ok(Trade {
            id,
            symbol,
            direction: self.direction,
            quantity: self.quantity,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            timestamp: self.timestamp,
            profit_loss,
            fees: self.fees,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a stored timestamp into wall-clock time.
///
/// RFC 3339 values keep the wall-clock time they were written with and drop
/// the offset. A bare date is read as midnight.
pub fn parse_timestamp(trade_id: &str, value: &str) -> Result<NaiveDateTime, JournalError> {
    let text = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    if let Some(dt) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt);
    }
    Err(JournalError::InvalidTimestamp {
        trade_id: trade_id.to_string(),
        value: value.to_string(),
    })
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// One past the largest numeric id in `ids`. Non-numeric ids are ignored.
pub fn next_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    let max = ids
        .into_iter()
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

pub fn next_trade_id(existing: &[Trade]) -> String {
    next_id(existing.iter().map(|t| t.id.as_str()))
}
