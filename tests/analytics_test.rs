//! End-to-end analytics over in-memory journals.
//!
//! Covers bucketing, aggregation, summary and ranking together, plus the
//! CLI pipeline functions driven by `MockTradeStore`.

mod common;

use approx::assert_relative_eq;
use common::*;
use tradejournal::cli;
use tradejournal::domain::aggregation::{aggregate, profit_loss_series, win_loss_series};
use tradejournal::domain::bucketing::bucket;
use tradejournal::domain::error::JournalError;
use tradejournal::domain::filter::TradeFilter;
use tradejournal::domain::period::Granularity;
use tradejournal::domain::review::{PerformanceReview, ReviewParams};
use tradejournal::domain::settings::{JournalSettings, StoreKind};
use tradejournal::domain::summary::{bottom_symbols, summarize, top_symbols, ProfitFactor};

fn settings(max_trades: usize) -> JournalSettings {
    JournalSettings {
        store: StoreKind::Csv {
            trades_file: "unused.csv".into(),
            notes_file: "unused-notes.csv".into(),
            plans_file: "unused-plans.csv".into(),
        },
        review: ReviewParams::default(),
        recent_trades: 5,
        max_trades,
        template_path: None,
        include_trade_log: true,
    }
}

mod two_day_scenario {
    use super::*;

    #[test]
    fn daily_buckets_and_cumulative_series() {
        let trades = two_day_journal();
        let periods = aggregate(&bucket(&trades, Granularity::Daily));

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].period_key.start(), day("2024-03-04"));
        assert_relative_eq!(periods[0].period_profit_loss, 59.5, epsilon = 1e-9);
        assert_eq!((periods[0].winning_count, periods[0].losing_count), (2, 0));
        assert_eq!(periods[1].period_key.start(), day("2024-03-05"));
        assert_relative_eq!(periods[1].period_profit_loss, -58.8, epsilon = 1e-9);
        assert_eq!((periods[1].winning_count, periods[1].losing_count), (0, 1));

        let cumulative: Vec<f64> = periods.iter().map(|p| p.cumulative_profit_loss).collect();
        assert_relative_eq!(cumulative[0], 59.5, epsilon = 1e-9);
        assert_relative_eq!(cumulative[1], 0.7, epsilon = 1e-9);
    }

    #[test]
    fn summary_figures() {
        let summary = summarize(&two_day_journal());
        assert_eq!(summary.win_rate, 67);
        assert_relative_eq!(summary.average_win, 29.75, epsilon = 1e-9);
        assert_relative_eq!(summary.average_loss, -58.8, epsilon = 1e-9);
        let pf = summary.profit_factor.value().unwrap();
        assert_relative_eq!(pf, 29.75 / 58.8, epsilon = 1e-9);
        assert_eq!(summary.profit_factor.to_string(), "0.51");
    }

    #[test]
    fn ranking_both_ends() {
        let trades = two_day_journal();
        let best: Vec<String> = top_symbols(&trades, 2).into_iter().map(|s| s.symbol).collect();
        assert_eq!(best, vec!["AAPL", "MSFT"]);

        let worst: Vec<String> = bottom_symbols(&trades, 1).into_iter().map(|s| s.symbol).collect();
        assert_eq!(worst, vec!["TSLA"]);
    }

    #[test]
    fn chart_series_are_labelled() {
        let periods = aggregate(&bucket(&two_day_journal(), Granularity::Daily));
        let pnl = profit_loss_series(&periods);
        assert_eq!(pnl[0].0, "Mar 4");
        assert_eq!(pnl[1].0, "Mar 5");

        let wl = win_loss_series(&periods);
        assert_eq!(wl, vec![("Mar 4".to_string(), 2, 0), ("Mar 5".to_string(), 0, 1)]);
    }

    #[test]
    fn weekly_collapses_both_days() {
        let periods = aggregate(&bucket(&two_day_journal(), Granularity::Weekly));
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].label(), "Week of Mar 4");
        assert_eq!(periods[0].trade_count, 3);
    }
}

mod empty_journal {
    use super::*;

    #[test]
    fn everything_degenerates_to_zero() {
        let review = PerformanceReview::compute(&[], &ReviewParams::default());
        assert!(review.periods.is_empty());
        assert!(review.ranking.is_empty());
        assert_eq!(review.summary.total_profit_loss, 0.0);
        assert_eq!(review.summary.win_rate, 0);
        assert_eq!(review.summary.average_win, 0.0);
        assert_eq!(review.summary.average_loss, 0.0);
        assert_eq!(review.summary.profit_factor, ProfitFactor::Undefined);
    }
}

mod out_of_order_input {
    use super::*;

    #[test]
    fn cumulative_follows_the_calendar_not_the_input() {
        let trades = vec![
            make_trade("1", "C", "2024-05-20", 5.0),
            make_trade("2", "A", "2024-01-02", 10.0),
            make_trade("3", "B", "2024-03-15", -4.0),
        ];
        let periods = aggregate(&bucket(&trades, Granularity::Monthly));
        let labels: Vec<String> = periods.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["Jan 2024", "Mar 2024", "May 2024"]);
        let cumulative: Vec<f64> = periods.iter().map(|p| p.cumulative_profit_loss).collect();
        assert_eq!(cumulative, vec![10.0, 6.0, 11.0]);
    }

    #[test]
    fn year_boundary_weeks_stay_ordered() {
        // 2024-12-30 is a Monday; 2025-01-05 is the Sunday of that week
        let trades = vec![
            make_trade("1", "A", "2025-01-05", 1.0),
            make_trade("2", "A", "2024-12-29", 2.0),
            make_trade("3", "A", "2024-12-30", 3.0),
        ];
        let periods = aggregate(&bucket(&trades, Granularity::Weekly));
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].period_key.start(), day("2024-12-23"));
        assert_eq!(periods[1].period_key.start(), day("2024-12-30"));
        assert_eq!(periods[1].trade_count, 2);
    }
}

mod pipeline {
    use super::*;

    #[test]
    fn analyze_uses_store_snapshot() {
        let store = MockTradeStore::with_trades(two_day_journal());
        let (trades, review) =
            cli::analyze(&store, &settings(100), &TradeFilter::default(), None).unwrap();
        assert_eq!(trades.len(), 3);
        assert_eq!(review.periods.len(), 2);
        assert_eq!(review.top_symbols()[0].symbol, "AAPL");
    }

    #[test]
    fn granularity_override_wins() {
        let store = MockTradeStore::with_trades(two_day_journal());
        let (_, review) = cli::analyze(
            &store,
            &settings(100),
            &TradeFilter::default(),
            Some(Granularity::Monthly),
        )
        .unwrap();
        assert_eq!(review.params.granularity, Granularity::Monthly);
        assert_eq!(review.periods.len(), 1);
    }

    #[test]
    fn filter_applies_before_analysis() {
        let store = MockTradeStore::with_trades(two_day_journal());
        let filter = TradeFilter {
            start: Some(day("2024-03-05")),
            ..TradeFilter::default()
        };
        let (trades, review) = cli::analyze(&store, &settings(100), &filter, None).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(review.summary.win_rate, 0);
        assert_eq!(review.summary.profit_factor, ProfitFactor::Ratio(0.0));
    }

    #[test]
    fn oversized_journal_is_rejected() {
        let store = MockTradeStore::with_trades(two_day_journal());
        let err = cli::analyze(&store, &settings(2), &TradeFilter::default(), None).unwrap_err();
        assert!(matches!(err, JournalError::TooManyTrades { count: 3, limit: 2 }));
    }

    #[test]
    fn store_failure_propagates() {
        let store = MockTradeStore::new().with_error("disk on fire");
        let err = cli::analyze(&store, &settings(100), &TradeFilter::default(), None).unwrap_err();
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn add_trade_books_profit_and_assigns_id() {
        let store = MockTradeStore::with_trades(two_day_journal());
        let trade = cli::add_trade(
            &store,
            cli::NewTradeArgs {
                symbol: "nvda".into(),
                direction: Direction::Short,
                quantity: 2,
                entry: 900.0,
                exit: 880.0,
                date: Some("2024-03-06T09:45:00".into()),
                fees: None,
                notes: Some("  ".into()),
            },
        )
        .unwrap();

        assert_eq!(trade.id, "4");
        assert_eq!(trade.symbol, "NVDA");
        assert_relative_eq!(trade.profit_loss, 40.0, epsilon = 1e-9);
        assert_eq!(trade.notes, None);
        assert_eq!(store.snapshot().len(), 4);
    }

    #[test]
    fn add_trade_rejects_bad_date() {
        let store = MockTradeStore::new();
        let err = cli::add_trade(
            &store,
            cli::NewTradeArgs {
                symbol: "SPY".into(),
                direction: Direction::Buy,
                quantity: 1,
                entry: 1.0,
                exit: 2.0,
                date: Some("03/06/2024".into()),
                fees: None,
                notes: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, JournalError::InvalidTimestamp { .. }));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn import_rejects_colliding_ids() {
        let source = MockTradeStore::with_trades(two_day_journal());
        let target = MockTradeStore::with_trades(vec![make_trade("2", "X", "2024-01-01", 1.0)]);
        assert!(cli::import_trades(&source, &target).is_err());
        assert_eq!(target.snapshot().len(), 1);
    }

    #[test]
    fn import_appends_in_source_order() {
        let source = MockTradeStore::with_trades(two_day_journal());
        let target = MockTradeStore::with_trades(vec![make_trade("9", "X", "2024-01-01", 1.0)]);
        assert_eq!(cli::import_trades(&source, &target).unwrap(), 3);
        let ids: Vec<String> = target.snapshot().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["9", "1", "2", "3"]);
    }
}

mod notebook {
    use super::*;
    use tradejournal::domain::note::NewNote;
    use tradejournal::domain::plan::{NewPlan, PlanStatus};

    fn new_note(title: &str, trade_ids: &[&str]) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: "Followed the plan.".to_string(),
            date: day("2024-03-04"),
            trade_ids: trade_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn add_note_links_known_trades() {
        let notes = MockNoteStore::with_notes(vec![make_note("4", "2024-03-01", "Prep")]);
        let trades = MockTradeStore::with_trades(two_day_journal());

        let note = cli::add_note(&notes, &trades, new_note("Morning session", &["1", "2"])).unwrap();
        assert_eq!(note.id, "5");
        assert_eq!(note.trade_ids, vec!["1", "2"]);
        assert_eq!(notes.snapshot().len(), 2);
    }

    #[test]
    fn add_note_rejects_unknown_trade_and_saves_nothing() {
        let notes = MockNoteStore::default();
        let trades = MockTradeStore::with_trades(two_day_journal());

        let err = cli::add_note(&notes, &trades, new_note("Recap", &["1", "42"])).unwrap_err();
        assert!(
            matches!(&err, JournalError::InvalidNote { reason, .. } if reason == "unknown trade id 42")
        );
        assert_eq!(
            format!("{:?}", std::process::ExitCode::from(&err)),
            format!("{:?}", std::process::ExitCode::from(4u8))
        );
        assert!(notes.snapshot().is_empty());
    }

    #[test]
    fn add_note_without_trades_skips_trade_store() {
        let notes = MockNoteStore::default();
        let trades = MockTradeStore::new().with_error("offline");
        assert!(cli::add_note(&notes, &trades, new_note("Watchlist", &[])).is_ok());
    }

    #[test]
    fn daily_journal_pairs_notes_with_trades() {
        let notes = MockNoteStore::with_notes(vec![
            make_note("1", "2024-03-04", "Opening drive"),
            make_note("2", "2024-03-05", "Gave it back"),
        ]);
        let trades = MockTradeStore::with_trades(two_day_journal());

        let journal =
            cli::daily_journal(&notes, &trades, &settings(100), day("2024-03-05")).unwrap();
        assert_eq!(journal.notes.len(), 1);
        assert_eq!(journal.notes[0].title, "Gave it back");
        assert_eq!(journal.trades.len(), 1);
        assert_relative_eq!(journal.summary.total_profit_loss, -58.8, epsilon = 1e-9);
        assert_eq!(journal.summary.win_rate, 0);
    }

    #[test]
    fn edit_and_delete_persist() {
        let notes = MockNoteStore::with_notes(vec![
            make_note("1", "2024-03-04", "A"),
            make_note("2", "2024-03-04", "B"),
        ]);
        cli::edit_note(&notes, "2", "Revised".into()).unwrap();
        assert_eq!(notes.snapshot()[1].content, "Revised");

        cli::delete_note(&notes, "1").unwrap();
        let left = notes.snapshot();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, "2");

        let err = cli::delete_note(&notes, "1").unwrap_err();
        assert_eq!(err.to_string(), "no note with id 1");
    }

    #[test]
    fn plans_are_added_and_marked() {
        let plans = MockPlanStore::default();
        let new = NewPlan {
            symbol: "nvda".into(),
            entry_price: 100.0,
            target_price: 115.0,
            stop_loss: 95.0,
            quantity: 20,
            strategy: "Pullback to VWAP".into(),
            notes: Some("Only above the open".into()),
        };
        let plan = cli::add_plan(&plans, new, day("2024-03-04")).unwrap();
        assert_eq!(plan.id, "1");
        assert_eq!(plan.status, PlanStatus::Planned);
        assert_relative_eq!(plan.risk_reward(), 3.0);
        assert_relative_eq!(plan.potential_gain(), 300.0);
        assert_relative_eq!(plan.potential_loss(), 100.0);

        let executed = cli::update_plan_status(&plans, "1", PlanStatus::Executed).unwrap();
        assert_eq!(executed.status, PlanStatus::Executed);
        assert_eq!(plans.snapshot()[0].status, PlanStatus::Executed);
        assert!(matches!(
            cli::update_plan_status(&plans, "2", PlanStatus::Cancelled),
            Err(JournalError::NotFound { .. })
        ));
    }
}
