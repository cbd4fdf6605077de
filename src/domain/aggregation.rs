//! Aggregation stage: per-period metrics and the cumulative P&L series.

use super::bucketing::PeriodBuckets;
use super::period::PeriodKey;
use super::trade::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodBucket {
    pub period_key: PeriodKey,
    pub period_profit_loss: f64,
    pub trade_count: usize,
    pub winning_count: usize,
    pub losing_count: usize,
    pub cumulative_profit_loss: f64,
}

impl PeriodBucket {
    pub fn label(&self) -> String {
        self.period_key.label()
    }
}

/// Fold buckets into chronologically ordered period metrics.
///
/// Buckets are sorted by period start before the cumulative fold runs, so
/// the running total always accumulates oldest to newest.
pub fn aggregate(buckets: &PeriodBuckets<'_>) -> Vec<PeriodBucket> {
    let mut ordered: Vec<(&PeriodKey, &[&Trade])> = buckets.iter().collect();
    ordered.sort_by_key(|(key, _)| key.start());

    let mut cumulative = 0.0_f64;
    ordered
        .into_iter()
        .map(|(key, members)| {
            let mut period_profit_loss = 0.0_f64;
            let mut winning_count = 0usize;
            let mut losing_count = 0usize;
            for trade in members {
                period_profit_loss += trade.profit_loss;
                if trade.is_win() {
                    winning_count += 1;
                } else if trade.is_loss() {
                    losing_count += 1;
                }
            }
            cumulative += period_profit_loss;

            PeriodBucket {
                period_key: *key,
                period_profit_loss,
                trade_count: members.len(),
                winning_count,
                losing_count,
                cumulative_profit_loss: cumulative,
            }
        })
        .collect()
}

/// Chart-ready `(label, period P&L, cumulative P&L)` points.
pub fn profit_loss_series(periods: &[PeriodBucket]) -> Vec<(String, f64, f64)> {
    periods
        .iter()
        .map(|p| (p.label(), p.period_profit_loss, p.cumulative_profit_loss))
        .collect()
}

/// Chart-ready `(label, wins, losses)` points.
pub fn win_loss_series(periods: &[PeriodBucket]) -> Vec<(String, usize, usize)> {
    periods
        .iter()
        .map(|p| (p.label(), p.winning_count, p.losing_count))
        .collect()
}
