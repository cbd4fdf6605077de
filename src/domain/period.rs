//! Period granularity and canonical period keys.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Granularity::Daily),
            "weekly" | "week" => Ok(Granularity::Weekly),
            "monthly" | "month" => Ok(Granularity::Monthly),
            other => Err(format!(
                "unknown granularity '{other}' (expected daily, weekly or monthly)"
            )),
        }
    }
}

/// Identifies one period at a given granularity.
///
/// `start` is the first calendar day of the period: the date itself for
/// daily keys, the Monday for weekly keys, the 1st for monthly keys. Sorting
/// by `start` gives chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodKey {
    granularity: Granularity,
    start: NaiveDate,
}

impl PeriodKey {
    pub fn for_date(date: NaiveDate, granularity: Granularity) -> Self {
        let start = match granularity {
            Granularity::Daily => date,
            Granularity::Weekly => week_start(date),
            Granularity::Monthly => date.with_day(1).unwrap_or(date),
        };
        Self { granularity, start }
    }

    /// Parse a canonical key string back into a key.
    pub fn parse(granularity: Granularity, key: &str) -> Result<Self, String> {
        let key = key.trim();
        let start = match granularity {
            Granularity::Daily | Granularity::Weekly => {
                NaiveDate::parse_from_str(key, "%Y-%m-%d")
            }
            Granularity::Monthly => NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d"),
        }
        .map_err(|e| format!("invalid {granularity} period key '{key}': {e}"))?;

        if granularity == Granularity::Weekly && start.weekday() != Weekday::Mon {
            return Err(format!("weekly period key '{key}' is not a Monday"));
        }
        Ok(Self { granularity, start })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::for_date(date, self.granularity) == *self
    }

    /// Short axis label for charts.
    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Daily => self.start.format("%b %-d").to_string(),
            Granularity::Weekly => format!("Week of {}", self.start.format("%b %-d")),
            Granularity::Monthly => self.start.format("%b %Y").to_string(),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.granularity {
            Granularity::Daily | Granularity::Weekly => {
                write!(f, "{}", self.start.format("%Y-%m-%d"))
            }
            Granularity::Monthly => write!(f, "{}", self.start.format("%Y-%m")),
        }
    }
}

/// Monday of the ISO week containing `date`. Sunday belongs to the week
/// that started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
