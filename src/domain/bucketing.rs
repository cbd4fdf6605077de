//! Bucketing stage: partition trades into period buckets.

use super::grouping::OrderedGroups;
use super::period::{Granularity, PeriodKey};
use super::trade::Trade;

/// Trades grouped by period, in first-seen key order.
///
/// Holds references into the caller's trade slice; the trades themselves are
/// never copied or modified.
#[derive(Debug, Clone)]
pub struct PeriodBuckets<'a> {
    granularity: Granularity,
    groups: OrderedGroups<PeriodKey, &'a Trade>,
}

impl<'a> PeriodBuckets<'a> {
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn trade_count(&self) -> usize {
        self.groups.value_count()
    }

    pub fn get(&self, key: &PeriodKey) -> Option<&[&'a Trade]> {
        self.groups.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PeriodKey, &[&'a Trade])> {
        self.groups.iter()
    }
}

pub fn bucket(trades: &[Trade], granularity: Granularity) -> PeriodBuckets<'_> {
    let groups = trades
        .iter()
        .map(|t| (PeriodKey::for_date(t.date(), granularity), t))
        .collect();
    PeriodBuckets {
        granularity,
        groups,
    }
}
