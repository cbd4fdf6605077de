//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{CsvNoteStore, CsvPlanStore, CsvTradeStore};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::typst_report::TypstReportAdapter;
use crate::domain::aggregation::PeriodBucket;
use crate::domain::config_validation::validate_journal_config;
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::error::JournalError;
use crate::domain::filter::TradeFilter;
use crate::domain::note::{self, journal_dates, next_note_id, DailyJournal, NewNote, Note};
use crate::domain::period::Granularity;
use crate::domain::plan::{self, next_plan_id, NewPlan, PlanStatus, TradePlan};
use crate::domain::review::PerformanceReview;
use crate::domain::settings::{JournalSettings, StoreKind};
use crate::domain::summary::{Summary, SymbolSummary};
use crate::domain::trade::{next_trade_id, parse_timestamp, Direction, NewTrade, Trade};
use crate::ports::note_port::NoteStore;
use crate::ports::plan_port::PlanStore;
use crate::ports::report_port::ReportPort;
use crate::ports::trade_port::TradeStore;

#[derive(Parser, Debug)]
#[command(name = "tradejournal", about = "Trade journal performance analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Narrow the trade log before analysis.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive symbol substring
    #[arg(long)]
    pub symbol: Option<String>,
    #[arg(long)]
    pub direction: Option<Direction>,
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl From<FilterArgs> for TradeFilter {
    fn from(args: FilterArgs) -> Self {
        TradeFilter {
            symbol: args.symbol,
            direction: args.direction,
            start: args.from,
            end: args.to,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Overall P&L, win rate and profit factor
    Summary {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// P&L per day, week or month with a running total
    Periods {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        granularity: Option<Granularity>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Best and worst symbols by total P&L
    Symbols {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Today's figures and the most recent trades
    Dashboard {
        #[arg(short, long)]
        config: PathBuf,
        /// Defaults to the local date
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Write a Typst performance report
    Report {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        granularity: Option<Granularity>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Record a closed trade
    Add {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        direction: Direction,
        #[arg(long)]
        quantity: u32,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        exit: f64,
        /// Trade time; defaults to now
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        fees: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Append trades from a CSV file to the configured store
    Import {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Write every stored trade to a CSV file
    Export {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Journal notes and the per-day notebook
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },
    /// Trade plans with entry, target and stop
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Write a note for a day
    Add {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Defaults to the local date
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Id of a trade the note discusses; repeatable
        #[arg(long = "trade")]
        trades: Vec<String>,
    },
    /// Without --date, list journal dates; with it, show that day
    List {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Replace a note's content
    Edit {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long)]
        content: String,
    },
    Delete {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Record a new plan
    Add {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        target: f64,
        #[arg(long)]
        stop: f64,
        #[arg(long)]
        quantity: u32,
        #[arg(long)]
        strategy: String,
        #[arg(long)]
        notes: Option<String>,
    },
    List {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        status: Option<PlanStatus>,
    },
    /// Mark a plan planned, executed or cancelled
    Status {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: PlanStatus,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Summary { config, filter } => run_summary(&config, filter.into()),
        Command::Periods {
            config,
            granularity,
            filter,
        } => run_periods(&config, granularity, filter.into()),
        Command::Symbols {
            config,
            limit,
            filter,
        } => run_symbols(&config, limit, filter.into()),
        Command::Dashboard { config, today } => run_dashboard(&config, today),
        Command::Report {
            config,
            output,
            granularity,
            filter,
        } => run_report(&config, output, granularity, filter.into()),
        Command::Add {
            config,
            symbol,
            direction,
            quantity,
            entry,
            exit,
            date,
            fees,
            notes,
        } => run_add(
            &config,
            NewTradeArgs {
                symbol,
                direction,
                quantity,
                entry,
                exit,
                date,
                fees,
                notes,
            },
        ),
        Command::Import { config, csv } => run_import(&config, &csv),
        Command::Export { config, csv } => run_export(&config, &csv),
        Command::Note { action } => run_note(action),
        Command::Plan { action } => run_plan(action),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, JournalError> {
    FileConfigAdapter::load(path)
}

/// Load, validate and resolve the journal settings.
pub fn load_settings(path: &Path) -> Result<JournalSettings, JournalError> {
    tracing::debug!(path = %path.display(), "loading config");
    let config = load_config(path)?;
    validate_journal_config(&config)?;
    JournalSettings::from_config(&config)
}

pub fn open_store(kind: &StoreKind) -> Result<Box<dyn TradeStore>, JournalError> {
    match kind {
        StoreKind::Csv { trades_file, .. } => Ok(Box::new(CsvTradeStore::new(trades_file))),
        #[cfg(feature = "sqlite")]
        StoreKind::Sqlite { path, pool_size } => Ok(Box::new(open_sqlite(path, *pool_size)?)),
        #[cfg(not(feature = "sqlite"))]
        StoreKind::Sqlite { .. } => Err(sqlite_disabled()),
    }
}

pub fn open_note_store(kind: &StoreKind) -> Result<Box<dyn NoteStore>, JournalError> {
    match kind {
        StoreKind::Csv { notes_file, .. } => Ok(Box::new(CsvNoteStore::new(notes_file))),
        #[cfg(feature = "sqlite")]
        StoreKind::Sqlite { path, pool_size } => Ok(Box::new(open_sqlite(path, *pool_size)?)),
        #[cfg(not(feature = "sqlite"))]
        StoreKind::Sqlite { .. } => Err(sqlite_disabled()),
    }
}

pub fn open_plan_store(kind: &StoreKind) -> Result<Box<dyn PlanStore>, JournalError> {
    match kind {
        StoreKind::Csv { plans_file, .. } => Ok(Box::new(CsvPlanStore::new(plans_file))),
        #[cfg(feature = "sqlite")]
        StoreKind::Sqlite { path, pool_size } => Ok(Box::new(open_sqlite(path, *pool_size)?)),
        #[cfg(not(feature = "sqlite"))]
        StoreKind::Sqlite { .. } => Err(sqlite_disabled()),
    }
}

#[cfg(feature = "sqlite")]
fn open_sqlite(
    path: &str,
    pool_size: u32,
) -> Result<crate::adapters::sqlite_adapter::SqliteJournalStore, JournalError> {
    crate::adapters::sqlite_adapter::SqliteJournalStore::open(path, pool_size)
}

#[cfg(not(feature = "sqlite"))]
fn sqlite_disabled() -> JournalError {
    JournalError::ConfigInvalid {
        section: "journal".into(),
        key: "store".into(),
        reason: "sqlite feature is not enabled".into(),
    }
}

/// Snapshot the store, enforce the size limit, then filter.
pub fn load_trades(
    store: &dyn TradeStore,
    settings: &JournalSettings,
    filter: &TradeFilter,
) -> Result<Vec<Trade>, JournalError> {
    let trades = store.load_trades()?;
    settings.check_capacity(trades.len())?;
    if filter.is_empty() {
        return Ok(trades);
    }
    let filtered = filter.apply(&trades);
    tracing::debug!(total = trades.len(), kept = filtered.len(), "filtered trades");
    Ok(filtered)
}

/// Full analysis pipeline over one store snapshot.
pub fn analyze(
    store: &dyn TradeStore,
    settings: &JournalSettings,
    filter: &TradeFilter,
    granularity: Option<Granularity>,
) -> Result<(Vec<Trade>, PerformanceReview), JournalError> {
    let trades = load_trades(store, settings, filter)?;
    let mut params = settings.review;
    if let Some(g) = granularity {
        params.granularity = g;
    }
    let review = PerformanceReview::compute(&trades, &params);
    tracing::info!(
        trades = trades.len(),
        periods = review.periods.len(),
        granularity = %params.granularity,
        "analysis complete"
    );
    Ok((trades, review))
}

fn open(config_path: &Path) -> Result<(JournalSettings, Box<dyn TradeStore>), JournalError> {
    let settings = load_settings(config_path)?;
    let store = open_store(&settings.store)?;
    Ok((settings, store))
}

fn run_summary(config_path: &Path, filter: TradeFilter) -> Result<(), JournalError> {
    let (settings, store) = open(config_path)?;
    let trades = load_trades(store.as_ref(), &settings, &filter)?;
    print!("{}", format_summary(&Summary::compute(&trades)));
    Ok(())
}

fn run_periods(
    config_path: &Path,
    granularity: Option<Granularity>,
    filter: TradeFilter,
) -> Result<(), JournalError> {
    let (settings, store) = open(config_path)?;
    let (_, review) = analyze(store.as_ref(), &settings, &filter, granularity)?;
    print!("{}", format_periods(&review.periods));
    Ok(())
}

fn run_symbols(
    config_path: &Path,
    limit: Option<usize>,
    filter: TradeFilter,
) -> Result<(), JournalError> {
    let (mut settings, store) = open(config_path)?;
    if let Some(n) = limit.filter(|n| *n > 0) {
        settings.review.top_symbols = n;
    }
    let (_, review) = analyze(store.as_ref(), &settings, &filter, None)?;
    print!("{}", format_symbols(&review));
    Ok(())
}

fn run_dashboard(config_path: &Path, today: Option<NaiveDate>) -> Result<(), JournalError> {
    let (settings, store) = open(config_path)?;
    let trades = load_trades(store.as_ref(), &settings, &TradeFilter::default())?;
    let notes = open_note_store(&settings.store)?.load_notes()?;
    let today = today.unwrap_or_else(local_today);
    let snapshot = DashboardSnapshot::compute(&trades, &notes, today, settings.recent_trades);
    print!("{}", format_dashboard(&snapshot));
    Ok(())
}

fn run_report(
    config_path: &Path,
    output: Option<PathBuf>,
    granularity: Option<Granularity>,
    filter: TradeFilter,
) -> Result<(), JournalError> {
    let (settings, store) = open(config_path)?;
    let (trades, review) = analyze(store.as_ref(), &settings, &filter, granularity)?;

    let output = output.unwrap_or_else(|| PathBuf::from("report.typ"));
    let adapter = TypstReportAdapter::new(settings.template_path.clone(), settings.include_trade_log);
    adapter.write(&review, &trades, &output.to_string_lossy())?;
    println!("{}", output.display());
    Ok(())
}

pub struct NewTradeArgs {
    pub symbol: String,
    pub direction: Direction,
    pub quantity: u32,
    pub entry: f64,
    pub exit: f64,
    pub date: Option<String>,
    pub fees: Option<f64>,
    pub notes: Option<String>,
}

/// Book a new trade into `store`, returning it with its assigned id.
pub fn add_trade(store: &dyn TradeStore, args: NewTradeArgs) -> Result<Trade, JournalError> {
    let existing = store.load_trades()?;
    let id = next_trade_id(&existing);
    let timestamp = match args.date.as_deref() {
        Some(value) => parse_timestamp(&id, value)?,
        None => chrono::Local::now().naive_local(),
    };

    let trade = NewTrade {
        symbol: args.symbol,
        direction: args.direction,
        quantity: args.quantity,
        entry_price: args.entry,
        exit_price: args.exit,
        timestamp,
        fees: args.fees,
        notes: args.notes,
    }
    .into_trade(id)?;

    store.append_trade(&trade)?;
    tracing::info!(id = %trade.id, symbol = %trade.symbol, profit_loss = trade.profit_loss, "trade added");
    Ok(trade)
}

fn run_add(config_path: &Path, args: NewTradeArgs) -> Result<(), JournalError> {
    let (_, store) = open(config_path)?;
    let trade = add_trade(store.as_ref(), args)?;
    println!("{} {} {:+.2}", trade.id, trade.symbol, trade.profit_loss);
    Ok(())
}

/// Append every trade from `source` to `target`, keeping source order.
pub fn import_trades(source: &dyn TradeStore, target: &dyn TradeStore) -> Result<usize, JournalError> {
    let trades = source.load_trades()?;
    let mut merged = target.load_trades()?;
    for trade in &trades {
        if merged.iter().any(|t| t.id == trade.id) {
            return Err(JournalError::invalid_trade(&trade.id, "duplicate trade id"));
        }
        merged.push(trade.clone());
    }
    target.replace_all(&merged)?;
    Ok(trades.len())
}

fn run_import(config_path: &Path, csv: &Path) -> Result<(), JournalError> {
    let (_, store) = open(config_path)?;
    let count = import_trades(&CsvTradeStore::new(csv), store.as_ref())?;
    tracing::info!(count, source = %csv.display(), "imported trades");
    println!("{count}");
    Ok(())
}

fn run_export(config_path: &Path, csv: &Path) -> Result<(), JournalError> {
    let (_, store) = open(config_path)?;
    let trades = store.load_trades()?;
    CsvTradeStore::new(csv).replace_all(&trades)?;
    tracing::info!(count = trades.len(), target = %csv.display(), "exported trades");
    println!("{}", trades.len());
    Ok(())
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Save a new note, checking that every referenced trade exists.
pub fn add_note(
    notes: &dyn NoteStore,
    trades: &dyn TradeStore,
    new: NewNote,
) -> Result<Note, JournalError> {
    let mut existing = notes.load_notes()?;
    let note = new.into_note(next_note_id(&existing))?;
    if !note.trade_ids.is_empty() {
        let known = trades.load_trades()?;
        if let Some(missing) = note
            .trade_ids
            .iter()
            .find(|id| !known.iter().any(|t| &t.id == *id))
        {
            return Err(JournalError::invalid_note(
                &note.id,
                format!("unknown trade id {missing}"),
            ));
        }
    }
    existing.push(note.clone());
    notes.save_notes(&existing)?;
    tracing::info!(id = %note.id, date = %note.date, "note added");
    Ok(note)
}

pub fn edit_note(store: &dyn NoteStore, id: &str, content: String) -> Result<Note, JournalError> {
    let mut notes = store.load_notes()?;
    let edited = note::edit_note(&mut notes, id, content)?;
    store.save_notes(&notes)?;
    Ok(edited)
}

pub fn delete_note(store: &dyn NoteStore, id: &str) -> Result<Note, JournalError> {
    let mut notes = store.load_notes()?;
    let removed = note::delete_note(&mut notes, id)?;
    store.save_notes(&notes)?;
    tracing::info!(id, "note deleted");
    Ok(removed)
}

/// Notes, trades and trade summary for one calendar day.
pub fn daily_journal(
    notes: &dyn NoteStore,
    trades: &dyn TradeStore,
    settings: &JournalSettings,
    date: NaiveDate,
) -> Result<DailyJournal, JournalError> {
    let all = load_trades(trades, settings, &TradeFilter::default())?;
    Ok(DailyJournal::compute(&notes.load_notes()?, &all, date))
}

pub fn add_plan(store: &dyn PlanStore, new: NewPlan, date: NaiveDate) -> Result<TradePlan, JournalError> {
    let mut plans = store.load_plans()?;
    let plan = new.into_plan(next_plan_id(&plans), date)?;
    plans.push(plan.clone());
    store.save_plans(&plans)?;
    tracing::info!(id = %plan.id, symbol = %plan.symbol, risk_reward = plan.risk_reward(), "plan added");
    Ok(plan)
}

pub fn update_plan_status(
    store: &dyn PlanStore,
    id: &str,
    status: PlanStatus,
) -> Result<TradePlan, JournalError> {
    let mut plans = store.load_plans()?;
    let updated = plan::set_status(&mut plans, id, status)?;
    store.save_plans(&plans)?;
    Ok(updated)
}

fn run_note(action: NoteCommand) -> Result<(), JournalError> {
    match action {
        NoteCommand::Add {
            config,
            title,
            content,
            date,
            trades,
        } => {
            let settings = load_settings(&config)?;
            let new = NewNote {
                title,
                content,
                date: date.unwrap_or_else(local_today),
                trade_ids: trades,
            };
            let note = add_note(
                open_note_store(&settings.store)?.as_ref(),
                open_store(&settings.store)?.as_ref(),
                new,
            )?;
            println!("{} {} {}", note.id, note.date, note.title);
        }
        NoteCommand::List { config, date } => {
            let settings = load_settings(&config)?;
            let notes = open_note_store(&settings.store)?;
            match date {
                Some(date) => {
                    let trades = open_store(&settings.store)?;
                    let day = daily_journal(notes.as_ref(), trades.as_ref(), &settings, date)?;
                    print!("{}", format_daily_journal(&day));
                }
                None => print!("{}", format_journal_dates(&journal_dates(&notes.load_notes()?))),
            }
        }
        NoteCommand::Edit {
            config,
            id,
            content,
        } => {
            let settings = load_settings(&config)?;
            let note = edit_note(open_note_store(&settings.store)?.as_ref(), &id, content)?;
            println!("{} {} {}", note.id, note.date, note.title);
        }
        NoteCommand::Delete { config, id } => {
            let settings = load_settings(&config)?;
            let note = delete_note(open_note_store(&settings.store)?.as_ref(), &id)?;
            println!("{} {} {}", note.id, note.date, note.title);
        }
    }
    Ok(())
}

fn run_plan(action: PlanCommand) -> Result<(), JournalError> {
    match action {
        PlanCommand::Add {
            config,
            symbol,
            entry,
            target,
            stop,
            quantity,
            strategy,
            notes,
        } => {
            let settings = load_settings(&config)?;
            let new = NewPlan {
                symbol,
                entry_price: entry,
                target_price: target,
                stop_loss: stop,
                quantity,
                strategy,
                notes,
            };
            let plan = add_plan(open_plan_store(&settings.store)?.as_ref(), new, local_today())?;
            print!("{}", format_plans(std::slice::from_ref(&plan)));
        }
        PlanCommand::List { config, status } => {
            let settings = load_settings(&config)?;
            let plans: Vec<TradePlan> = open_plan_store(&settings.store)?
                .load_plans()?
                .into_iter()
                .filter(|p| status.is_none_or(|s| p.status == s))
                .collect();
            print!("{}", format_plans(&plans));
        }
        PlanCommand::Status { config, id, status } => {
            let settings = load_settings(&config)?;
            let plan = update_plan_status(open_plan_store(&settings.store)?.as_ref(), &id, status)?;
            print!("{}", format_plans(std::slice::from_ref(&plan)));
        }
    }
    Ok(())
}

fn signed(value: f64) -> String {
    format!("{value:+.2}")
}

fn lines(rows: impl IntoIterator<Item = String>) -> String {
    rows.into_iter().map(|row| row + "\n").collect()
}

pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Total P&L:      {}\n\
         Trades:         {} ({} won, {} lost)\n\
         Win Rate:       {}%\n\
         Average Win:    {:.2}\n\
         Average Loss:   {:.2}\n\
         Profit Factor:  {}\n",
        signed(summary.total_profit_loss),
        summary.trade_count,
        summary.winning_count,
        summary.losing_count,
        summary.win_rate,
        summary.average_win,
        summary.average_loss,
        summary.profit_factor,
    )
}

pub fn format_periods(periods: &[PeriodBucket]) -> String {
    let header = format!(
        "{:<12} {:>6} {:>5} {:>6} {:>12} {:>12}",
        "Period", "Trades", "Wins", "Losses", "P&L", "Cumulative"
    );
    lines(std::iter::once(header).chain(periods.iter().map(|p| {
        format!(
            "{:<12} {:>6} {:>5} {:>6} {:>12} {:>12}",
            p.label(),
            p.trade_count,
            p.winning_count,
            p.losing_count,
            signed(p.period_profit_loss),
            signed(p.cumulative_profit_loss),
        )
    })))
}

fn symbol_rows<'a>(rows: impl Iterator<Item = &'a SymbolSummary>) -> String {
    lines(rows.enumerate().map(|(i, s)| {
        format!(
            "{:>3}. {:<10} {:>5} {:>12}",
            i + 1,
            s.symbol,
            s.trade_count,
            signed(s.total_profit_loss)
        )
    }))
}

pub fn format_symbols(review: &PerformanceReview) -> String {
    format!(
        "Best symbols\n{}Worst symbols\n{}",
        symbol_rows(review.top_symbols().iter()),
        symbol_rows(review.bottom_symbols().into_iter()),
    )
}

fn trade_row(t: &Trade) -> String {
    format!(
        "  {} {:<8} {:<5} {:>6} {:>12}",
        t.timestamp.format("%Y-%m-%d %H:%M"),
        t.symbol,
        t.direction,
        t.quantity,
        signed(t.profit_loss)
    )
}

pub fn format_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = format!(
        "Total P&L:   {}\n\
         Today ({}):  {} across {} trades\n\
         Win Rate:    {}% of {} trades\n\
         Journal:     {} entries\n",
        signed(snapshot.total_profit_loss),
        snapshot.today,
        signed(snapshot.today_profit_loss),
        snapshot.today_trade_count,
        snapshot.win_rate,
        snapshot.trade_count,
        snapshot.journal_entries,
    );
    if !snapshot.recent_trades.is_empty() {
        out.push_str("Recent trades\n");
        out.push_str(&lines(snapshot.recent_trades.iter().map(trade_row)));
    }
    if !snapshot.recent_notes.is_empty() {
        out.push_str("Recent notes\n");
        out.push_str(&lines(
            snapshot
                .recent_notes
                .iter()
                .map(|n| format!("  {}  {}", n.date, n.title)),
        ));
    }
    out
}

pub fn format_journal_dates(dates: &[(NaiveDate, usize)]) -> String {
    if dates.is_empty() {
        return "No notes yet\n".to_string();
    }
    lines(dates.iter().map(|(date, count)| {
        let noun = if *count == 1 { "note" } else { "notes" };
        format!("{date}  {count} {noun}")
    }))
}

pub fn format_daily_journal(day: &DailyJournal) -> String {
    let mut out = format!(
        "{}\n{} notes, {} trades\n",
        day.date.format("%A, %B %-d, %Y"),
        day.notes.len(),
        day.trades.len()
    );
    if !day.trades.is_empty() {
        let s = &day.summary;
        out.push_str(&format!(
            "P&L {}  Win Rate {}%  Wins {}  Losses {}\nTrades\n",
            signed(s.total_profit_loss),
            s.win_rate,
            s.winning_count,
            s.losing_count
        ));
        out.push_str(&lines(day.trades.iter().map(trade_row)));
    }
    out.push_str("Notes\n");
    if day.notes.is_empty() {
        out.push_str("  No notes for this day yet\n");
    }
    for n in &day.notes {
        out.push_str(&format!("  [{}] {}\n", n.id, n.title));
        out.push_str(&lines(n.content.lines().map(|l| format!("      {l}"))));
    }
    out
}

pub fn format_plans(plans: &[TradePlan]) -> String {
    if plans.is_empty() {
        return "No trade plans yet\n".to_string();
    }
    lines(plans.iter().map(|p| {
        format!(
            "{:>3}. {:<8} {:<9} entry {:.2}  target {:.2}  stop {:.2}  R/R {:.2}  {}",
            p.id,
            p.symbol,
            p.status.to_string(),
            p.entry_price,
            p.target_price,
            p.stop_loss,
            p.risk_reward(),
            p.strategy
        )
    }))
}
