//! Plain-language trading insights derived from a [`Summary`].

use std::fmt;

use super::period::Granularity;
use super::summary::Summary;

/// Win rates strictly above this are considered above average.
pub const WIN_RATE_BENCHMARK: u32 = 60;

/// Losses are well managed when the average loss is smaller than this
/// fraction of the average win.
pub const LOSS_TO_WIN_LIMIT: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinRateAssessment {
    AboveAverage(u32),
    RoomForImprovement(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskAssessment {
    Effective,
    TightenStops,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insights {
    pub win_rate: WinRateAssessment,
    pub risk: RiskAssessment,
    pub review_cadence: Granularity,
}

impl Insights {
    pub fn from_summary(summary: &Summary, granularity: Granularity) -> Self {
        let win_rate = if summary.win_rate > WIN_RATE_BENCHMARK {
            WinRateAssessment::AboveAverage(summary.win_rate)
        } else {
            WinRateAssessment::RoomForImprovement(summary.win_rate)
        };

        let risk = if summary.average_loss.abs() < summary.average_win * LOSS_TO_WIN_LIMIT {
            RiskAssessment::Effective
        } else {
            RiskAssessment::TightenStops
        };

        Insights {
            win_rate,
            risk,
            review_cadence: granularity,
        }
    }

    pub fn cadence_message(&self) -> String {
        format!(
            "Based on your trading pattern, {} reviews are recommended to maintain consistency in your trading approach.",
            self.review_cadence
        )
    }
}

impl fmt::Display for WinRateAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinRateAssessment::AboveAverage(rate) => write!(
                f,
                "Your {rate}% win rate is above average. Keep up the good work!"
            ),
            WinRateAssessment::RoomForImprovement(rate) => write!(
                f,
                "Your {rate}% win rate has room for improvement. Consider reviewing your entry criteria."
            ),
        }
    }
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskAssessment::Effective => {
                f.write_str("Your risk management is effective with losses smaller than wins.")
            }
            RiskAssessment::TightenStops => f.write_str(
                "Consider tightening stop losses as your average loss is relatively large compared to wins.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::summary::ProfitFactor;

    fn summary(win_rate: u32, average_win: f64, average_loss: f64) -> Summary {
        Summary {
            total_profit_loss: 0.0,
            trade_count: 10,
            winning_count: 0,
            losing_count: 0,
            win_rate,
            average_win,
            average_loss,
            profit_factor: ProfitFactor::Undefined,
        }
    }

    #[test]
    fn win_rate_benchmark_is_strict() {
        let at = Insights::from_summary(&summary(60, 0.0, 0.0), Granularity::Daily);
        assert_eq!(at.win_rate, WinRateAssessment::RoomForImprovement(60));

        let above = Insights::from_summary(&summary(61, 0.0, 0.0), Granularity::Daily);
        assert_eq!(above.win_rate, WinRateAssessment::AboveAverage(61));
        assert!(above.win_rate.to_string().starts_with("Your 61% win rate is above average"));
    }

    #[test]
    fn small_losses_are_effective_risk_management() {
        let insights = Insights::from_summary(&summary(50, 100.0, -60.0), Granularity::Weekly);
        assert_eq!(insights.risk, RiskAssessment::Effective);
    }

    #[test]
    fn large_losses_suggest_tighter_stops() {
        let insights = Insights::from_summary(&summary(50, 100.0, -70.0), Granularity::Weekly);
        assert_eq!(insights.risk, RiskAssessment::TightenStops);
    }

    #[test]
    fn empty_summary_suggests_tighter_stops() {
        // 0 < 0 is false
        let insights = Insights::from_summary(&summary(0, 0.0, 0.0), Granularity::Monthly);
        assert_eq!(insights.risk, RiskAssessment::TightenStops);
    }

    #[test]
    fn cadence_follows_granularity() {
        let insights = Insights::from_summary(&summary(0, 0.0, 0.0), Granularity::Monthly);
        assert!(insights.cadence_message().contains(" monthly reviews "));
    }
}
