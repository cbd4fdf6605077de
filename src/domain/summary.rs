//! Whole-set performance summary and per-symbol ranking.
//!
//! Empty or one-sided trade sets never fail. Ratios with nothing to divide
//! by report zero, except the profit factor, which reports
//! [`ProfitFactor::Undefined`] and must be branched on before formatting.

use std::fmt;

use super::grouping::OrderedGroups;
use super::trade::Trade;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfitFactor {
    Ratio(f64),
    Undefined,
}

impl ProfitFactor {
    pub fn value(&self) -> Option<f64> {
        match self {
            ProfitFactor::Ratio(v) => Some(*v),
            ProfitFactor::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ProfitFactor::Undefined)
    }
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Ratio(v) => write!(f, "{v:.2}"),
            ProfitFactor::Undefined => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_profit_loss: f64,
    pub trade_count: usize,
    pub winning_count: usize,
    pub losing_count: usize,
    /// Whole percent, 0..=100.
    pub win_rate: u32,
    pub average_win: f64,
    /// Mean of the losing trades; negative, or 0 with no losses.
    pub average_loss: f64,
    pub profit_factor: ProfitFactor,
}

impl Summary {
    pub fn compute(trades: &[Trade]) -> Self {
        let mut total_profit_loss = 0.0_f64;
        let mut winning_count = 0usize;
        let mut losing_count = 0usize;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;

        for trade in trades {
            let pnl = trade.profit_loss;
            total_profit_loss += pnl;
            if pnl > 0.0 {
                winning_count += 1;
                total_wins += pnl;
            } else if pnl < 0.0 {
                losing_count += 1;
                total_losses += pnl;
            }
        }

        let trade_count = trades.len();
        let win_rate = if trade_count > 0 {
            (winning_count as f64 / trade_count as f64 * 100.0).round() as u32
        } else {
            0
        };

        let average_win = if winning_count > 0 {
            total_wins / winning_count as f64
        } else {
            0.0
        };

        let average_loss = if losing_count > 0 {
            total_losses / losing_count as f64
        } else {
            0.0
        };

        let profit_factor = if average_loss != 0.0 {
            ProfitFactor::Ratio((average_win / average_loss).abs())
        } else {
            ProfitFactor::Undefined
        };

        Summary {
            total_profit_loss,
            trade_count,
            winning_count,
            losing_count,
            win_rate,
            average_win,
            average_loss,
            profit_factor,
        }
    }
}

pub fn summarize(trades: &[Trade]) -> Summary {
    Summary::compute(trades)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSummary {
    pub symbol: String,
    pub total_profit_loss: f64,
    pub trade_count: usize,
}

/// Per-symbol totals, best first. Equal totals keep the order in which the
/// symbols first appear in `trades`.
pub fn rank_by_symbol(trades: &[Trade]) -> Vec<SymbolSummary> {
    let groups: OrderedGroups<&str, f64> = trades
        .iter()
        .map(|t| (t.symbol.as_str(), t.profit_loss))
        .collect();

    let mut ranked: Vec<SymbolSummary> = groups
        .iter()
        .map(|(symbol, pnls)| SymbolSummary {
            symbol: symbol.to_string(),
            total_profit_loss: pnls.iter().sum(),
            trade_count: pnls.len(),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.total_profit_loss.total_cmp(&a.total_profit_loss));
    ranked
}

pub fn top_symbols(trades: &[Trade], n: usize) -> Vec<SymbolSummary> {
    let mut ranked = rank_by_symbol(trades);
    ranked.truncate(n);
    ranked
}

/// The `n` worst symbols, worst first.
pub fn bottom_symbols(trades: &[Trade], n: usize) -> Vec<SymbolSummary> {
    rank_by_symbol(trades).into_iter().rev().take(n).collect()
}
