//! Typst performance report.
//!
//! Reads a Typst template (the built-in default or a custom file via
//! `template_path`), resolves every `{{PLACEHOLDER}}` marker from a
//! [`PerformanceReview`], and writes the resulting `.typ` file.

pub mod chart_svg;
pub mod default_template;
pub mod tables;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::error::JournalError;
use crate::domain::review::PerformanceReview;
use crate::domain::summary::SymbolSummary;
use crate::domain::trade::Trade;
use crate::ports::report_port::ReportPort;

/// Context for resolving template placeholders.
pub struct ReportContext<'a> {
    pub review: &'a PerformanceReview,
    pub trades: &'a [Trade],
    pub generated_on: NaiveDate,
    pub include_trade_log: bool,
}

fn embed_svg(svg: &str, fallback: &str) -> String {
    if svg.is_empty() {
        return fallback.to_string();
    }
    format!(
        "#image.decode(\n\"{}\",\n  width: 100%,\n)",
        svg.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

fn date_range(trades: &[Trade]) -> String {
    let first = trades.iter().map(Trade::date).min();
    let last = trades.iter().map(Trade::date).max();
    match (first, last) {
        (Some(first), Some(last)) if first == last => first.to_string(),
        (Some(first), Some(last)) => format!("{first} to {last}"),
        _ => "no trades".to_string(),
    }
}

/// Resolve all `{{PLACEHOLDER}}`s in `template`. Unknown markers are left
/// untouched.
pub fn resolve(template: &str, ctx: &ReportContext) -> String {
    let review = ctx.review;
    let top: Vec<&SymbolSummary> = review.top_symbols().iter().collect();
    let trade_log = if ctx.include_trade_log {
        format!("== Trade Log\n\n{}", tables::render_trade_log(ctx.trades))
    } else {
        String::new()
    };

    let replacements = [
        ("{{GENERATED_AT}}", ctx.generated_on.to_string()),
        ("{{GRANULARITY}}", review.params.granularity.to_string()),
        ("{{DATE_RANGE}}", date_range(ctx.trades)),
        ("{{SUMMARY_TABLE}}", tables::render_summary_table(&review.summary)),
        (
            "{{PNL_CHART}}",
            embed_svg(
                &chart_svg::generate_pnl_svg(&review.periods),
                "_No P&L data._",
            ),
        ),
        (
            "{{WIN_LOSS_CHART}}",
            embed_svg(
                &chart_svg::generate_win_loss_svg(&review.periods),
                "_No win/loss data._",
            ),
        ),
        ("{{PERIOD_TABLE}}", tables::render_period_table(&review.periods)),
        ("{{TOP_SYMBOLS}}", tables::render_symbol_table(&top)),
        (
            "{{BOTTOM_SYMBOLS}}",
            tables::render_symbol_table(&review.bottom_symbols()),
        ),
        ("{{INSIGHTS}}", tables::render_insights(&review.insights)),
        ("{{TRADE_LOG}}", trade_log),
    ];

    let mut output = template.to_string();
    for (marker, value) in replacements {
        output = output.replace(marker, &value);
    }
    output
}

pub struct TypstReportAdapter {
    template_path: Option<String>,
    include_trade_log: bool,
}

impl TypstReportAdapter {
    pub fn new(template_path: Option<String>, include_trade_log: bool) -> Self {
        Self {
            template_path,
            include_trade_log,
        }
    }

    fn load_template(&self) -> Result<String, JournalError> {
        match &self.template_path {
            Some(path) => fs::read_to_string(path).map_err(|e| JournalError::Storage {
                reason: format!("failed to read template {path}: {e}"),
            }),
            None => Ok(default_template::template().to_string()),
        }
    }
}

impl ReportPort for TypstReportAdapter {
    fn write(
        &self,
        review: &PerformanceReview,
        trades: &[Trade],
        output_path: &str,
    ) -> Result<(), JournalError> {
        let template = self.load_template()?;
        let ctx = ReportContext {
            review,
            trades,
            generated_on: chrono::Local::now().date_naive(),
            include_trade_log: self.include_trade_log,
        };
        let content = resolve(&template, &ctx);

        if let Some(parent) = Path::new(output_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, content)?;
        tracing::info!(output_path, periods = review.periods.len(), "report written");
        Ok(())
    }
}
