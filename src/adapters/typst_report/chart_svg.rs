//! SVG chart rendering for reports.
//!
//! Charts are plain SVG strings so the report can embed them with
//! `image.decode`. An empty period series renders as an empty string.

use crate::domain::aggregation::PeriodBucket;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 240.0;
const PADDING: f64 = 40.0;

const CUMULATIVE_COLOR: &str = "#3b82f6";
const PERIOD_COLOR: &str = "#10b981";
const WIN_COLOR: &str = "#10b981";
const LOSS_COLOR: &str = "#ef4444";

struct Frame {
    min: f64,
    max: f64,
    slots: usize,
}

impl Frame {
    /// Value range always includes zero so the baseline is visible.
    fn new(values: impl Iterator<Item = f64>, slots: usize) -> Self {
        let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let (min, max) = if max > min { (min, max) } else { (min - 1.0, max + 1.0) };
        Self { min, max, slots }
    }

    fn plot_width(&self) -> f64 {
        WIDTH - 2.0 * PADDING
    }

    fn plot_height(&self) -> f64 {
        HEIGHT - 2.0 * PADDING
    }

    fn y(&self, value: f64) -> f64 {
        HEIGHT - PADDING - (value - self.min) / (self.max - self.min) * self.plot_height()
    }

    /// Centre of slot `i`.
    fn x(&self, i: usize) -> f64 {
        let slot = self.plot_width() / self.slots.max(1) as f64;
        PADDING + slot * (i as f64 + 0.5)
    }

    fn slot_width(&self) -> f64 {
        self.plot_width() / self.slots.max(1) as f64
    }

    fn axes(&self) -> String {
        let zero = self.y(0.0);
        format!(
            concat!(
                r##"<line x1="{p}" y1="{p}" x2="{p}" y2="{b:.1}" stroke="#9ca3af" stroke-width="1"/>"##,
                r##"<line x1="{p}" y1="{z:.1}" x2="{r:.1}" y2="{z:.1}" stroke="#9ca3af" stroke-width="1" stroke-dasharray="3 3"/>"##,
                r#"<text x="{tx:.1}" y="{ty:.1}" font-size="10" text-anchor="end">{max:.0}</text>"#,
                r#"<text x="{tx:.1}" y="{by:.1}" font-size="10" text-anchor="end">{min:.0}</text>"#,
            ),
            p = PADDING,
            b = HEIGHT - PADDING,
            z = zero,
            r = WIDTH - PADDING,
            tx = PADDING - 4.0,
            ty = PADDING + 4.0,
            by = HEIGHT - PADDING,
            max = self.max,
            min = self.min,
        )
    }
}

fn polyline(frame: &Frame, values: &[f64], color: &str) -> String {
    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| format!("{:.1},{:.1}", frame.x(i), frame.y(v)))
        .collect();
    format!(
        r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{}"/>"#,
        points.join(" ")
    )
}

fn svg(body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" fill="white"/>{body}</svg>"#,
        w = WIDTH,
        h = HEIGHT,
    )
}

/// Cumulative and per-period P&L lines.
pub fn generate_pnl_svg(periods: &[PeriodBucket]) -> String {
    if periods.is_empty() {
        return String::new();
    }
    let cumulative: Vec<f64> = periods.iter().map(|p| p.cumulative_profit_loss).collect();
    let period: Vec<f64> = periods.iter().map(|p| p.period_profit_loss).collect();
    let frame = Frame::new(
        cumulative.iter().chain(period.iter()).copied(),
        periods.len(),
    );

    let mut body = frame.axes();
    body.push_str(&polyline(&frame, &period, PERIOD_COLOR));
    body.push_str(&polyline(&frame, &cumulative, CUMULATIVE_COLOR));
    svg(&body)
}

/// Side-by-side winning and losing trade counts per period.
pub fn generate_win_loss_svg(periods: &[PeriodBucket]) -> String {
    if periods.is_empty() {
        return String::new();
    }
    let frame = Frame::new(
        periods
            .iter()
            .flat_map(|p| [p.winning_count as f64, p.losing_count as f64]),
        periods.len(),
    );

    let bar = (frame.slot_width() * 0.35).max(1.0);
    let baseline = frame.y(0.0);
    let mut body = frame.axes();
    for (i, p) in periods.iter().enumerate() {
        let centre = frame.x(i);
        for (count, x, color) in [
            (p.winning_count, centre - bar, WIN_COLOR),
            (p.losing_count, centre, LOSS_COLOR),
        ] {
            if count == 0 {
                continue;
            }
            let top = frame.y(count as f64);
            body.push_str(&format!(
                r#"<rect x="{x:.1}" y="{top:.1}" width="{bar:.1}" height="{h:.1}" fill="{color}"/>"#,
                h = baseline - top,
            ));
        }
    }
    svg(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::period::{Granularity, PeriodKey};
    use chrono::NaiveDate;

    fn bucket(day: u32, pnl: f64, cumulative: f64, wins: usize, losses: usize) -> PeriodBucket {
        PeriodBucket {
            period_key: PeriodKey::for_date(
                NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
                Granularity::Daily,
            ),
            period_profit_loss: pnl,
            trade_count: wins + losses,
            winning_count: wins,
            losing_count: losses,
            cumulative_profit_loss: cumulative,
        }
    }

    #[test]
    fn empty_series_renders_nothing() {
        assert!(generate_pnl_svg(&[]).is_empty());
        assert!(generate_win_loss_svg(&[]).is_empty());
    }

    #[test]
    fn pnl_chart_has_two_lines() {
        let periods = vec![bucket(1, 59.5, 59.5, 2, 0), bucket(2, -58.8, 0.7, 0, 1)];
        let svg = generate_pnl_svg(&periods);
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(CUMULATIVE_COLOR));
    }

    #[test]
    fn single_flat_point_does_not_divide_by_zero() {
        let svg = generate_pnl_svg(&[bucket(1, 0.0, 0.0, 0, 0)]);
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
    }

    #[test]
    fn win_loss_chart_skips_empty_bars() {
        let periods = vec![bucket(1, 5.0, 5.0, 2, 0), bucket(2, -1.0, 4.0, 1, 3)];
        let svg = generate_win_loss_svg(&periods);
        // 2 + 0 bars in the first period, 1 + 3 in the second; 3 non-zero rects plus background
        assert_eq!(svg.matches("<rect").count(), 4);
        assert!(svg.contains(LOSS_COLOR));
    }
}
