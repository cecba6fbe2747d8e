//! Terminal rendering of a dashboard: metric cards and block-character charts.

use std::fmt::Write as _;

use crate::analyzer::{DashboardReport, RankedCount};
use crate::config::DashboardConfig;
use crate::render::format::{format_count, format_currency, format_decimal};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders the whole dashboard as plain text, top to bottom.
pub fn render_dashboard(report: &DashboardReport, config: &DashboardConfig) -> String {
    let mut out = String::new();
    let cur = &config.currency;
    let sep = cur.thousands_separator.as_str();
    let width = config.chart_width;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Brazilian E-Commerce Dashboard");
    let _ = writeln!(
        out,
        "Range: {} ({} days, {} of {} records; data spans {})",
        report.meta.range,
        report.meta.range.days(),
        format_count(report.meta.filtered_records, sep),
        format_count(report.meta.total_records, sep),
        report.meta.data_bounds,
    );

    // ── Daily orders ────────────────────────────────────────────────────────
    section(&mut out, "Daily Orders");
    cards(
        &mut out,
        &[
            ("Total orders", format_count(report.daily.total_orders, sep)),
            ("Total revenue", format_currency(report.daily.total_revenue, cur)),
        ],
    );
    let counts: Vec<f64> = report.daily.days.iter().map(|d| d.order_count as f64).collect();
    if let (Some(first), Some(last)) = (report.daily.days.first(), report.daily.days.last()) {
        let _ = writeln!(out, "Orders per day, {} → {}:", first.date, last.date);
        for chunk in sparkline(&counts).chars().collect::<Vec<_>>().chunks(width.max(1)) {
            let _ = writeln!(out, "  {}", chunk.iter().collect::<String>());
        }
        let peak = report
            .daily
            .days
            .iter()
            .max_by_key(|d| d.order_count)
            .map(|d| format!("{} ({} orders)", d.date, d.order_count))
            .unwrap_or_default();
        let _ = writeln!(out, "  peak: {peak}");
    }

    // ── Categories ──────────────────────────────────────────────────────────
    section(&mut out, "Best and Worst Performing Product Categories");
    let _ = writeln!(out, "Best performing (distinct products sold):");
    bar_chart(&mut out, &report.categories.best, width);
    let _ = writeln!(out, "Worst performing (distinct products sold):");
    bar_chart(&mut out, &report.categories.worst, width);

    // ── Regions ─────────────────────────────────────────────────────────────
    section(&mut out, "Customers by State");
    bar_chart(&mut out, &report.regions, width);

    // ── Monthly trend ───────────────────────────────────────────────────────
    let months = report.monthly.len();
    section(&mut out, &format!("Orders in the Last {months} Months"));
    let order_rows: Vec<(String, f64, String)> = report
        .monthly
        .iter()
        .map(|m| (m.period_key.clone(), m.order_count as f64, format_count(m.order_count, sep)))
        .collect();
    labelled_bars(&mut out, &order_rows, width);

    section(&mut out, &format!("Revenue in the Last {months} Months"));
    let revenue_rows: Vec<(String, f64, String)> = report
        .monthly
        .iter()
        .map(|m| (m.period_key.clone(), m.revenue, format_currency(m.revenue, cur)))
        .collect();
    labelled_bars(&mut out, &revenue_rows, width);

    // ── RFM ─────────────────────────────────────────────────────────────────
    section(&mut out, "RFM Parameters");
    cards(
        &mut out,
        &[
            ("Average recency (days)", format_decimal(report.rfm.avg_recency_days, 1, cur)),
            ("Average frequency", format_decimal(report.rfm.avg_frequency, 2, cur)),
            ("Average monetary", format_currency(report.rfm.avg_monetary, cur)),
        ],
    );

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n== {title} ==");
}

fn cards(out: &mut String, items: &[(&str, String)]) {
    for (label, value) in items {
        let _ = writeln!(out, "  {label:<24} {value}");
    }
}

fn bar_chart(out: &mut String, items: &[RankedCount], width: usize) {
    let rows: Vec<(String, f64, String)> = items
        .iter()
        .map(|i| (i.label.clone(), i.count as f64, i.count.to_string()))
        .collect();
    labelled_bars(out, &rows, width);
}

/// One bar per row, scaled so the largest value spans `width` characters.
fn labelled_bars(out: &mut String, rows: &[(String, f64, String)], width: usize) {
    if rows.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }
    let label_width = rows.iter().map(|(l, _, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v, _)| *v).fold(0.0_f64, f64::max);
    for (label, value, display) in rows {
        let _ = writeln!(
            out,
            "  {label:<label_width$} │{} {display}",
            bar(*value, max, width)
        );
    }
}

/// `█` repeated in proportion to `value / max`; any positive value gets at least one block.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width.max(1)))
}

/// One block character per value, the tallest for the maximum.
pub fn sparkline(values: &[f64]) -> String {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    values
        .iter()
        .map(|&v| {
            if max <= 0.0 || v <= 0.0 {
                SPARK_LEVELS[0]
            } else {
                let idx = ((v / max) * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::build_dashboard;
    use crate::dataset::test_support::line;
    use crate::dataset::{DateRange, OrderDataset};

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(10.0, 10.0, 8), "████████");
        assert_eq!(bar(5.0, 10.0, 8), "████");
        assert_eq!(bar(0.1, 10.0, 8), "█");
        assert_eq!(bar(0.0, 10.0, 8), "");
        assert_eq!(bar(3.0, 0.0, 8), "");
    }

    #[test]
    fn test_sparkline_levels() {
        assert_eq!(sparkline(&[0.0, 7.0, 14.0]), "▁▅█");
        assert_eq!(sparkline(&[]), "");
        assert_eq!(sparkline(&[0.0, 0.0]), "▁▁");
    }

    #[test]
    fn test_render_contains_every_section() {
        let ds = OrderDataset::new(vec![
            line("a", "c1", "2018-01-01 08:00:00", 10.0),
            line("b", "c2", "2018-01-01 09:00:00", 20.0),
            line("c", "c3", "2018-01-03 10:00:00", 5.0),
        ]);
        let config = DashboardConfig::default();
        let range = DateRange::resolve(None, None, ds.approval_bounds()).unwrap();
        let report = build_dashboard(&ds, &range, &config).unwrap();
        let text = render_dashboard(&report, &config);

        assert!(text.contains("== Daily Orders =="));
        assert!(text.contains("Total revenue"));
        assert!(text.contains("R$ 35,00"));
        assert!(text.contains("Best performing"));
        assert!(text.contains("Worst performing"));
        assert!(text.contains("== Customers by State =="));
        assert!(text.contains("Orders in the Last 1 Months"));
        assert!(text.contains("== RFM Parameters =="));
        assert!(text.contains("peak: 2018-01-01 (2 orders)"));
    }
}
