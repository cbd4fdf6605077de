//! Trade plan storage port trait.

use crate::domain::error::JournalError;
use crate::domain::plan::TradePlan;

pub trait PlanStore {
    fn load_plans(&self) -> Result<Vec<TradePlan>, JournalError>;

    fn save_plans(&self, plans: &[TradePlan]) -> Result<(), JournalError>;
}
