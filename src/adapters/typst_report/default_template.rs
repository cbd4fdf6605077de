//! Built-in Typst report template.
//!
//! Custom templates may use any subset of the `{{PLACEHOLDER}}` markers
//! listed in [`PLACEHOLDERS`].

pub const PLACEHOLDERS: [&str; 11] = [
    "{{GENERATED_AT}}",
    "{{GRANULARITY}}",
    "{{DATE_RANGE}}",
    "{{SUMMARY_TABLE}}",
    "{{PNL_CHART}}",
    "{{WIN_LOSS_CHART}}",
    "{{PERIOD_TABLE}}",
    "{{TOP_SYMBOLS}}",
    "{{BOTTOM_SYMBOLS}}",
    "{{INSIGHTS}}",
    "{{TRADE_LOG}}",
];

const DEFAULT_TEMPLATE: &str = r#"#set page(paper: "a4", margin: (x: 2cm, y: 2cm), numbering: "1")
#set text(size: 10pt)
#set table(stroke: 0.5pt + luma(200), inset: 6pt)

= Trading Performance Report

#text(fill: luma(120))[Generated {{GENERATED_AT}} · {{GRANULARITY}} periods · {{DATE_RANGE}}]

== Summary

{{SUMMARY_TABLE}}

== P&L Over Time

{{PNL_CHART}}

== Wins and Losses

{{WIN_LOSS_CHART}}

== Period Breakdown

{{PERIOD_TABLE}}

== Best Symbols

{{TOP_SYMBOLS}}

== Worst Symbols

{{BOTTOM_SYMBOLS}}

== Insights

{{INSIGHTS}}

{{TRADE_LOG}}
"#;

pub fn template() -> &'static str {
    DEFAULT_TEMPLATE
}
