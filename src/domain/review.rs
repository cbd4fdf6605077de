//! Performance review: bucketing, aggregation, summary, ranking and
//! insights in a single pass over a trade snapshot.

use super::aggregation::{aggregate, PeriodBucket};
use super::bucketing::bucket;
use super::insights::Insights;
use super::period::Granularity;
use super::summary::{rank_by_symbol, Summary, SymbolSummary};
use super::trade::Trade;

pub const DEFAULT_TOP_SYMBOLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewParams {
    pub granularity: Granularity,
    pub top_symbols: usize,
}

impl Default for ReviewParams {
    fn default() -> Self {
        Self {
            granularity: Granularity::Daily,
            top_symbols: DEFAULT_TOP_SYMBOLS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReview {
    pub params: ReviewParams,
    pub periods: Vec<PeriodBucket>,
    pub summary: Summary,
    /// Full ranking, best first.
    pub ranking: Vec<SymbolSummary>,
    pub insights: Insights,
}

impl PerformanceReview {
    pub fn compute(trades: &[Trade], params: &ReviewParams) -> Self {
        let periods = aggregate(&bucket(trades, params.granularity));
        let summary = Summary::compute(trades);
        let ranking = rank_by_symbol(trades);
        let insights = Insights::from_summary(&summary, params.granularity);

        PerformanceReview {
            params: *params,
            periods,
            summary,
            ranking,
            insights,
        }
    }

    pub fn top_symbols(&self) -> &[SymbolSummary] {
        let n = self.params.top_symbols.min(self.ranking.len());
        &self.ranking[..n]
    }

    /// Worst performers, worst first.
    pub fn bottom_symbols(&self) -> Vec<&SymbolSummary> {
        self.ranking.iter().rev().take(self.params.top_symbols).collect()
    }
}
