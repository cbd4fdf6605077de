//! At-a-glance dashboard figures.

use chrono::NaiveDate;

use super::note::{recent_notes, Note};
use super::summary::Summary;
use super::trade::Trade;

pub const RECENT_NOTES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub today: NaiveDate,
    pub total_profit_loss: f64,
    pub today_profit_loss: f64,
    pub today_trade_count: usize,
    pub trade_count: usize,
    pub win_rate: u32,
    /// Newest first.
    pub recent_trades: Vec<Trade>,
    pub journal_entries: usize,
    /// Newest first, at most [`RECENT_NOTES`].
    pub recent_notes: Vec<Note>,
}

impl DashboardSnapshot {
    /// `today` is supplied by the caller so the snapshot never reads the clock.
    pub fn compute(
        trades: &[Trade],
        notes: &[Note],
        today: NaiveDate,
        recent_limit: usize,
    ) -> Self {
        let summary = Summary::compute(trades);

        let (today_profit_loss, today_trade_count) = trades
            .iter()
            .filter(|t| t.date() == today)
            .fold((0.0_f64, 0usize), |(pnl, n), t| (pnl + t.profit_loss, n + 1));

        let mut recent_trades = trades.to_vec();
        recent_trades.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent_trades.truncate(recent_limit);

        DashboardSnapshot {
            today,
            total_profit_loss: summary.total_profit_loss,
            today_profit_loss,
            today_trade_count,
            trade_count: summary.trade_count,
            win_rate: summary.win_rate,
            recent_trades,
            journal_entries: notes.len(),
            recent_notes: recent_notes(notes, RECENT_NOTES),
        }
    }
}
