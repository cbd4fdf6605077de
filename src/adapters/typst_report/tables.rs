//! Typst table markup for the performance report.

use crate::domain::aggregation::PeriodBucket;
use crate::domain::insights::Insights;
use crate::domain::summary::{Summary, SymbolSummary};
use crate::domain::trade::Trade;

/// `$1,234.56` or `-$58.80`.
pub fn fmt_currency(value: f64) -> String {
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.00 prints without a sign
    let sign = if value < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// Escape text for use inside a Typst content block.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '\\' | '[' | ']' | '#' | '*' | '_' | '$' | '@' | '<' | '>' | '`' | '~' | '='
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn cell(text: &str) -> String {
    format!("[{}]", escape(text))
}

fn pnl_cell(value: f64) -> String {
    let color = if value >= 0.0 { "green" } else { "red" };
    format!("text(fill: {color}, {})", cell(&fmt_currency(value)))
}

pub fn render_summary_table(summary: &Summary) -> String {
    let rows = [
        ("Total P&L", pnl_cell(summary.total_profit_loss)),
        ("Trades", cell(&summary.trade_count.to_string())),
        ("Winning Trades", cell(&summary.winning_count.to_string())),
        ("Losing Trades", cell(&summary.losing_count.to_string())),
        ("Win Rate", cell(&format!("{}%", summary.win_rate))),
        ("Average Win", cell(&fmt_currency(summary.average_win))),
        ("Average Loss", cell(&fmt_currency(summary.average_loss))),
        ("Profit Factor", cell(&summary.profit_factor.to_string())),
    ];

    let mut out = String::from("#table(\n  columns: 2,\n  align: (left, right),\n");
    out.push_str("  [*Metric*], [*Value*],\n");
    for (label, value) in rows {
        out.push_str(&format!("  {}, {},\n", cell(label), value));
    }
    out.push(')');
    out
}

pub fn render_period_table(periods: &[PeriodBucket]) -> String {
    if periods.is_empty() {
        return "_No trades in range._".to_string();
    }

    let mut out = String::from(
        "#table(\n  columns: 6,\n  align: (left, right, right, right, right, right),\n",
    );
    out.push_str("  [*Period*], [*Trades*], [*Wins*], [*Losses*], [*P&L*], [*Cumulative*],\n");
    for p in periods {
        out.push_str(&format!(
            "  {}, [{}], [{}], [{}], {}, {},\n",
            cell(&p.label()),
            p.trade_count,
            p.winning_count,
            p.losing_count,
            pnl_cell(p.period_profit_loss),
            pnl_cell(p.cumulative_profit_loss),
        ));
    }
    out.push(')');
    out
}

pub fn render_symbol_table(symbols: &[&SymbolSummary]) -> String {
    if symbols.is_empty() {
        return "_No symbols traded._".to_string();
    }

    let mut out = String::from("#table(\n  columns: 4,\n  align: (right, left, right, right),\n");
    out.push_str("  [*\\#*], [*Symbol*], [*Trades*], [*P&L*],\n");
    for (i, s) in symbols.iter().enumerate() {
        out.push_str(&format!(
            "  [{}], {}, [{}], {},\n",
            i + 1,
            cell(&s.symbol),
            s.trade_count,
            pnl_cell(s.total_profit_loss),
        ));
    }
    out.push(')');
    out
}

pub fn render_insights(insights: &Insights) -> String {
    format!(
        "- {}\n- {}\n- {}",
        escape(&insights.win_rate.to_string()),
        escape(&insights.risk.to_string()),
        escape(&insights.cadence_message()),
    )
}

/// Trade log in chronological order.
pub fn render_trade_log(trades: &[Trade]) -> String {
    if trades.is_empty() {
        return "_No trades recorded._".to_string();
    }

    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.timestamp);

    let mut out = String::from(
        "#table(\n  columns: 8,\n  align: (left, left, left, right, right, right, right, left),\n",
    );
    out.push_str(
        "  [*Date*], [*Symbol*], [*Side*], [*Qty*], [*Entry*], [*Exit*], [*P&L*], [*Notes*],\n",
    );
    for t in sorted {
        out.push_str(&format!(
            "  [{}], {}, [{}], [{}], {}, {}, {}, {},\n",
            t.timestamp.format("%Y-%m-%d %H:%M"),
            cell(&t.symbol),
            t.direction,
            t.quantity,
            cell(&fmt_currency(t.entry_price)),
            cell(&fmt_currency(t.exit_price)),
            pnl_cell(t.profit_loss),
            cell(t.notes.as_deref().unwrap_or("")),
        ));
    }
    out.push(')');
    out
}
