//! Text charts
//!
//! Terminal renderings of the analysis visualisations: share breakdowns,
//! signed bar charts, the running balance and the gain/loss waterfall.

use super::report::{format_bar, format_percentage, label_width, truncate};
use crate::models::Money;
use crate::services::personal::BalancePoint;
use crate::services::portfolio::WaterfallStep;

const MAX_LABEL: usize = 28;

/// Share of each slice in a whole, as percentage bars
///
/// `slices` carry percentages in the 0..=100 range.
pub fn format_share_chart(slices: &[(&str, f64)], width: usize) -> String {
    if slices.is_empty() {
        return "No data to chart.\n".to_string();
    }

    let label_w = label_width(slices.iter().map(|(l, _)| *l), 5).min(MAX_LABEL);
    let mut out = String::new();
    for (label, share) in slices {
        out.push_str(&format!(
            "{:<label_w$}  {}  {:>6}\n",
            truncate(label, label_w),
            format_bar(*share, 100.0, width),
            format_percentage(*share),
            label_w = label_w,
        ));
    }
    out
}

/// Horizontal bars for signed values
///
/// Each row is `(label, value, formatted value)`. Bars are scaled to the
/// largest magnitude; negative values draw with a lighter shade.
pub fn format_signed_bar_chart(rows: &[(String, f64, String)], width: usize) -> String {
    if rows.is_empty() {
        return "No data to chart.\n".to_string();
    }

    let label_w = label_width(rows.iter().map(|(l, _, _)| l.as_str()), 5).min(MAX_LABEL);
    let max = rows.iter().map(|(_, v, _)| v.abs()).fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (label, value, text) in rows {
        let bar = signed_bar(*value, max, width);
        out.push_str(&format!(
            "{:<label_w$}  {:<width$}  {:>14}\n",
            truncate(label, label_w),
            bar,
            text,
            label_w = label_w,
            width = width,
        ));
    }
    out
}

fn signed_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value == 0.0 {
        return String::new();
    }
    let len = ((value.abs() / max) * width as f64).round() as usize;
    let len = len.clamp(1, width);
    if value > 0.0 {
        "█".repeat(len)
    } else {
        "▒".repeat(len)
    }
}

/// Running balance after each entry
pub fn format_balance_trend(points: &[BalancePoint], symbol: &str, width: usize) -> String {
    if points.is_empty() {
        return "No entries.\n".to_string();
    }

    let rows: Vec<(String, f64, String)> = points
        .iter()
        .map(|p| {
            (
                format!("{}  {:>12}", p.date, p.amount.format_grouped(symbol)),
                p.balance.as_f64(),
                p.balance.format_grouped(symbol),
            )
        })
        .collect();
    format_signed_bar_chart(&rows, width)
}

/// Gain/loss waterfall
///
/// Every step spans from the previous running total to the new one on a
/// shared axis that always includes zero.
pub fn format_waterfall(steps: &[WaterfallStep], symbol: &str, width: usize) -> String {
    if steps.is_empty() {
        return "No holdings.\n".to_string();
    }

    let mut lo = 0i64;
    let mut hi = 0i64;
    for step in steps {
        lo = lo.min(step.running_total.cents());
        hi = hi.max(step.running_total.cents());
    }
    let span = (hi as f64 - lo as f64).max(1.0);
    let position =
        |cents: i64| (((cents as f64 - lo as f64) / span) * width as f64).round() as usize;

    let label_w = label_width(steps.iter().map(|s| s.asset.as_str()), 5).min(MAX_LABEL);
    let mut out = String::new();
    let mut previous = Money::zero();
    for step in steps {
        let from = position(previous.cents());
        let to = position(step.running_total.cents());
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        let glyph = if step.change.is_negative() { "▒" } else { "█" };
        let bar = format!(
            "{}{}",
            " ".repeat(start),
            glyph.repeat((end - start).max(1))
        );
        out.push_str(&format!(
            "{:<label_w$}  {:<bar_w$}  {:>14}  {:>14}\n",
            truncate(&step.asset, label_w),
            bar,
            step.change.format_grouped(symbol),
            step.running_total.format_grouped(symbol),
            label_w = label_w,
            bar_w = width + 1,
        ));
        previous = step.running_total;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_share_chart_lines() {
        let chart = format_share_chart(&[("Income", 75.0), ("Expenses", 25.0)], 20);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Income  "));
        assert!(lines[0].ends_with("75%"));
        assert_eq!(lines[1].chars().filter(|c| *c == '█').count(), 5);
    }

    #[test]
    fn test_signed_bars_scale_to_largest_magnitude() {
        let chart = format_signed_bar_chart(
            &[
                ("Rent".to_string(), -100.0, "-$100.00".to_string()),
                ("Salary".to_string(), 50.0, "$50.00".to_string()),
            ],
            10,
        );
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0].chars().filter(|c| *c == '▒').count(), 10);
        assert_eq!(lines[1].chars().filter(|c| *c == '█').count(), 5);
    }

    #[test]
    fn test_balance_trend_shows_running_balance() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let chart = format_balance_trend(
            &[BalancePoint {
                date,
                amount: Money::from_cents(500_000),
                balance: Money::from_cents(500_000),
            }],
            "$",
            10,
        );
        assert!(chart.contains("2024-03-01"));
        assert!(chart.trim_end().ends_with("$5,000.00"));
    }

    #[test]
    fn test_waterfall_steps() {
        let steps = vec![
            WaterfallStep {
                asset: "A".into(),
                change: Money::from_cents(1_000),
                running_total: Money::from_cents(1_000),
            },
            WaterfallStep {
                asset: "B".into(),
                change: Money::from_cents(-500),
                running_total: Money::from_cents(500),
            },
        ];
        let chart = format_waterfall(&steps, "$", 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0].chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(lines[1].chars().filter(|c| *c == '▒').count(), 5);
        assert!(lines[1].trim_end().ends_with("$5.00"));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(format_share_chart(&[], 10), "No data to chart.\n");
        assert_eq!(format_waterfall(&[], "$", 10), "No holdings.\n");
    }
}
