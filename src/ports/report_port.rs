//! Report generation port trait.

use crate::domain::error::JournalError;
use crate::domain::review::PerformanceReview;
use crate::domain::trade::Trade;

/// Port for writing performance reports.
pub trait ReportPort {
    fn write(
        &self,
        review: &PerformanceReview,
        trades: &[Trade],
        output_path: &str,
    ) -> Result<(), JournalError>;
}
