//! Trade log filtering.

use chrono::NaiveDate;

use super::trade::{Direction, Trade};

/// Narrowing criteria for the trade log. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFilter {
    /// Case-insensitive substring of the symbol.
    pub symbol: Option<String>,
    pub direction: Option<Direction>,
    /// Inclusive.
    pub start: Option<NaiveDate>,
    /// Inclusive.
    pub end: Option<NaiveDate>,
}

impl TradeFilter {
    pub fn is_empty(&self) -> bool {
        self.symbol.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.direction.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        let symbol_ok = match self.symbol.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => trade
                .symbol
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        };
        let direction_ok = self.direction.is_none_or(|d| trade.direction == d);
        let date = trade.date();
        let start_ok = self.start.is_none_or(|s| date >= s);
        let end_ok = self.end.is_none_or(|e| date <= e);

        symbol_ok && direction_ok && start_ok && end_ok
    }

    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
