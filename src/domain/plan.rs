//! Trade plans: intended entries with a target and a stop.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::error::JournalError;
use super::trade::next_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanStatus {
    #[default]
    Planned,
    Executed,
    Cancelled,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlanStatus::Planned => "Planned",
            PlanStatus::Executed => "Executed",
            PlanStatus::Cancelled => "Cancelled",
        })
    }
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planned" => Ok(PlanStatus::Planned),
            "executed" => Ok(PlanStatus::Executed),
            "cancelled" | "canceled" => Ok(PlanStatus::Cancelled),
            other => Err(format!(
                "unknown plan status '{other}' (expected planned, executed or cancelled)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradePlan {
    pub id: String,
    pub symbol: String,
    pub entry_price: f64,
    pub target_price: f64,
    pub stop_loss: f64,
    pub quantity: u32,
    pub strategy: String,
    pub notes: Option<String>,
    pub status: PlanStatus,
    pub date: NaiveDate,
}

impl TradePlan {
    /// Reward per unit of risk: `|target - entry| / |entry - stop|`.
    /// Zero when the stop sits at the entry.
    pub fn risk_reward(&self) -> f64 {
        let risk = (self.entry_price - self.stop_loss).abs();
        if risk == 0.0 {
            return 0.0;
        }
        (self.target_price - self.entry_price).abs() / risk
    }

    pub fn potential_gain(&self) -> f64 {
        (self.target_price - self.entry_price) * self.quantity as f64
    }

    pub fn potential_loss(&self) -> f64 {
        (self.entry_price - self.stop_loss) * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlan {
    pub symbol: String,
    pub entry_price: f64,
    pub target_price: f64,
    pub stop_loss: f64,
    pub quantity: u32,
    pub strategy: String,
    pub notes: Option<String>,
}

impl NewPlan {
    /// New plans always start as [`PlanStatus::Planned`].
    pub fn into_plan(self, id: impl Into<String>, date: NaiveDate) -> Result<TradePlan, JournalError> {
        let id = id.into();
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(JournalError::invalid_plan(&id, "symbol must not be empty"));
        }
        if self.quantity == 0 {
            return Err(JournalError::invalid_plan(&id, "quantity must be positive"));
        }
        let strategy = self.strategy.trim().to_string();
        if strategy.is_empty() {
            return Err(JournalError::invalid_plan(&id, "strategy must not be empty"));
        }
        for (name, price) in [
            ("entry_price", self.entry_price),
            ("target_price", self.target_price),
            ("stop_loss", self.stop_loss),
        ] {
            if !price.is_finite() || price < 0.0 {
                return Err(JournalError::invalid_plan(
                    &id,
                    format!("{name} must be a non-negative number"),
                ));
            }
        }

        Ok(TradePlan {
            id,
            symbol,
            entry_price: self.entry_price,
            target_price: self.target_price,
            stop_loss: self.stop_loss,
            quantity: self.quantity,
            strategy,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            status: PlanStatus::Planned,
            date,
        })
    }
}

pub fn next_plan_id(existing: &[TradePlan]) -> String {
    next_id(existing.iter().map(|p| p.id.as_str()))
}

pub fn set_status(
    plans: &mut [TradePlan],
    id: &str,
    status: PlanStatus,
) -> Result<TradePlan, JournalError> {
    let plan = plans
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| JournalError::NotFound {
            kind: "trade plan",
            id: id.to_string(),
        })?;
    plan.status = status;
    Ok(plan.clone())
}
