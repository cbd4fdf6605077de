//! Trade storage port trait.

use crate::domain::error::JournalError;
use crate::domain::trade::Trade;

/// Persistent home of the trade collection.
///
/// `load_trades` returns a snapshot in stored order; analytics never write
/// back through this trait.
pub trait TradeStore {
    fn load_trades(&self) -> Result<Vec<Trade>, JournalError>;

    fn append_trade(&self, trade: &Trade) -> Result<(), JournalError>;

    fn replace_all(&self, trades: &[Trade]) -> Result<(), JournalError>;
}
