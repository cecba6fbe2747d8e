use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::analyzer::{DashboardReport, RankedCount};
use crate::config::DashboardConfig;
use crate::error::AppError;
use crate::export::{
    create_currency_format, create_date_format, create_header_format, create_integer_format,
    create_number_format, ranked_bar_chart, trend_line_chart, SeriesRange, HIGHLIGHT_COLOR,
    TREND_COLOR,
};

pub const SHEET_SUMMARY: &str = "Summary";
pub const SHEET_DAILY: &str = "DailyOrders";
pub const SHEET_CATEGORIES: &str = "Categories";
pub const SHEET_REGIONS: &str = "Regions";
pub const SHEET_MONTHLY: &str = "MonthlyTrend";
pub const SHEET_RFM: &str = "RFM";

/// Builds the dashboard workbook, 6 sheets:
/// - "Summary"     : range, record counts and metric cards
/// - "DailyOrders" : orders/revenue per day + line chart
/// - "Categories"  : best and worst categories + bar charts
/// - "Regions"     : customers per state + bar chart
/// - "MonthlyTrend": last months orders/revenue + two line charts
/// - "RFM"         : RFM averages
pub fn generate_dashboard_report(
    report: &DashboardReport,
    config: &DashboardConfig,
) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    write_summary(&mut wb, report, config)?;
    write_daily(&mut wb, report, config)?;
    write_categories(&mut wb, report)?;
    write_regions(&mut wb, report)?;
    write_monthly(&mut wb, report, config)?;
    write_rfm(&mut wb, report, config)?;
    Ok(wb.save_to_buffer()?)
}

// ── Sheet 1: Summary ─────────────────────────────────────────────────────────

fn write_summary(
    wb: &mut Workbook,
    report: &DashboardReport,
    config: &DashboardConfig,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_SUMMARY)?;

    let hdr = create_header_format();
    let date = create_date_format();
    let int = create_integer_format();
    let money = create_currency_format(&config.currency);

    ws.write_with_format(0, 0, "Indicator", &hdr)?;
    ws.write_with_format(0, 1, "Value", &hdr)?;

    ws.write(1, 0, "Range start")?;
    ws.write_with_format(1, 1, &report.meta.range.start, &date)?;
    ws.write(2, 0, "Range end")?;
    ws.write_with_format(2, 1, &report.meta.range.end, &date)?;

    let counts: &[(&str, usize)] = &[
        ("Records in range", report.meta.filtered_records),
        ("Records loaded", report.meta.total_records),
        ("Total orders", report.daily.total_orders),
        ("Product categories", report.categories.category_count),
        ("Customers", report.rfm.customers),
    ];
    for (i, (label, val)) in counts.iter().enumerate() {
        let row = (i + 3) as u32;
        ws.write(row, 0, *label)?;
        ws.write_with_format(row, 1, *val as f64, &int)?;
    }

    let revenue_row = (counts.len() + 3) as u32;
    ws.write(revenue_row, 0, "Total revenue")?;
    ws.write_with_format(revenue_row, 1, report.daily.total_revenue, &money)?;

    ws.set_column_width(0, 22)?;
    ws.set_column_width(1, 18)?;

    Ok(())
}

// ── Sheet 2: Daily orders ────────────────────────────────────────────────────

fn write_daily(
    wb: &mut Workbook,
    report: &DashboardReport,
    config: &DashboardConfig,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_DAILY)?;

    let hdr = create_header_format();
    let date = create_date_format();
    let int = create_integer_format();
    let money = create_currency_format(&config.currency);

    let headers = ["Date", "Orders", "Revenue"];
    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, *h, &hdr)?;
    }

    for (i, d) in report.daily.days.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write_with_format(row, 0, &d.date, &date)?;
        ws.write_with_format(row, 1, d.order_count as f64, &int)?;
        ws.write_with_format(row, 2, d.revenue, &money)?;
    }

    if !report.daily.days.is_empty() {
        let last_row = report.daily.days.len() as u32;
        ws.set_freeze_panes(1, 0)?;
        ws.autofilter(0, 0, last_row, (headers.len() - 1) as u16)?;

        let range = SeriesRange {
            sheet: SHEET_DAILY,
            first_row: 1,
            last_row,
            category_col: 0,
            value_col: 1,
        };
        let mut chart = trend_line_chart(&range, "Daily orders", HIGHLIGHT_COLOR, 2.0);
        chart.set_width(960).set_height(480);
        ws.insert_chart(1, 4, &chart)?;
    }

    ws.set_column_width(0, 14)?;
    ws.set_column_width(1, 10)?;
    ws.set_column_width(2, 16)?;

    Ok(())
}

// ── Sheet 3: Categories ──────────────────────────────────────────────────────

fn write_categories(wb: &mut Workbook, report: &DashboardReport) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_CATEGORIES)?;

    let hdr = create_header_format();
    let int = create_integer_format();

    // Best in columns A:B, worst in D:E.
    write_ranking(ws, 0, "Best performing", &report.categories.best, &hdr, &int)?;
    write_ranking(ws, 3, "Worst performing", &report.categories.worst, &hdr, &int)?;

    let mut chart_row = 1;
    for (col, title, items) in [
        (0u16, "Best performing categories", &report.categories.best),
        (3u16, "Worst performing categories", &report.categories.worst),
    ] {
        if items.is_empty() {
            continue;
        }
        let range = SeriesRange {
            sheet: SHEET_CATEGORIES,
            first_row: 1,
            last_row: items.len() as u32,
            category_col: col,
            value_col: col + 1,
        };
        let mut chart = ranked_bar_chart(&range, title, "Products sold");
        if col == 3 {
            chart.y_axis().set_reverse();
        }
        ws.insert_chart(chart_row, 7, &chart)?;
        chart_row += 16;
    }

    ws.set_column_width(0, 32)?;
    ws.set_column_width(3, 32)?;

    Ok(())
}

// ── Sheet 4: Regions ─────────────────────────────────────────────────────────

fn write_regions(wb: &mut Workbook, report: &DashboardReport) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_REGIONS)?;

    let hdr = create_header_format();
    let int = create_integer_format();

    write_ranking(ws, 0, "State", &report.regions, &hdr, &int)?;

    if !report.regions.is_empty() {
        let last_row = report.regions.len() as u32;
        ws.set_freeze_panes(1, 0)?;
        ws.autofilter(0, 0, last_row, 1)?;

        let range = SeriesRange {
            sheet: SHEET_REGIONS,
            first_row: 1,
            last_row,
            category_col: 0,
            value_col: 1,
        };
        let mut chart = ranked_bar_chart(&range, "Customers by state", "Customers");
        chart.set_width(720).set_height(600);
        ws.insert_chart(1, 3, &chart)?;
    }

    ws.set_column_width(0, 12)?;
    ws.set_column_width(1, 12)?;

    Ok(())
}

// ── Sheet 5: Monthly trend ───────────────────────────────────────────────────

fn write_monthly(
    wb: &mut Workbook,
    report: &DashboardReport,
    config: &DashboardConfig,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_MONTHLY)?;

    let hdr = create_header_format();
    let int = create_integer_format();
    let money = create_currency_format(&config.currency);

    let headers = ["Month", "Label", "Orders", "Revenue"];
    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, *h, &hdr)?;
    }

    for (i, m) in report.monthly.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, m.period_key.as_str())?;
        ws.write(row, 1, m.period_label.as_str())?;
        ws.write_with_format(row, 2, m.order_count as f64, &int)?;
        ws.write_with_format(row, 3, m.revenue, &money)?;
    }

    if !report.monthly.is_empty() {
        let last_row = report.monthly.len() as u32;
        let months = report.monthly.len();

        let orders = SeriesRange {
            sheet: SHEET_MONTHLY,
            first_row: 1,
            last_row,
            category_col: 0,
            value_col: 2,
        };
        let chart = trend_line_chart(
            &orders,
            &format!("Orders, last {months} months"),
            TREND_COLOR,
            3.0,
        );
        ws.insert_chart(1, 5, &chart)?;

        let revenue = SeriesRange {
            value_col: 3,
            ..orders
        };
        let chart = trend_line_chart(
            &revenue,
            &format!("Revenue, last {months} months"),
            TREND_COLOR,
            3.0,
        );
        ws.insert_chart(17, 5, &chart)?;
    }

    ws.set_column_width(0, 10)?;
    ws.set_column_width(1, 16)?;
    ws.set_column_width(2, 10)?;
    ws.set_column_width(3, 16)?;

    Ok(())
}

// ── Sheet 6: RFM ─────────────────────────────────────────────────────────────

fn write_rfm(
    wb: &mut Workbook,
    report: &DashboardReport,
    config: &DashboardConfig,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_RFM)?;

    let hdr = create_header_format();
    let num = create_number_format();
    let int = create_integer_format();
    let money = create_currency_format(&config.currency);

    ws.write_with_format(0, 0, "Indicator", &hdr)?;
    ws.write_with_format(0, 1, "Value", &hdr)?;

    ws.write(1, 0, "Customers")?;
    ws.write_with_format(1, 1, report.rfm.customers as f64, &int)?;
    ws.write(2, 0, "Average recency (days)")?;
    ws.write_with_format(2, 1, report.rfm.avg_recency_days, &num)?;
    ws.write(3, 0, "Average frequency")?;
    ws.write_with_format(3, 1, report.rfm.avg_frequency, &num)?;
    ws.write(4, 0, "Average monetary")?;
    ws.write_with_format(4, 1, report.rfm.avg_monetary, &money)?;

    ws.set_column_width(0, 26)?;
    ws.set_column_width(1, 16)?;

    Ok(())
}

fn write_ranking(
    ws: &mut Worksheet,
    col: u16,
    label_header: &str,
    items: &[RankedCount],
    hdr: &rust_xlsxwriter::Format,
    int: &rust_xlsxwriter::Format,
) -> Result<(), XlsxError> {
    ws.write_with_format(0, col, label_header, hdr)?;
    ws.write_with_format(0, col + 1, "Count", hdr)?;
    for (i, item) in items.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, col, item.label.as_str())?;
        ws.write_with_format(row, col + 1, item.count as f64, int)?;
    }
    Ok(())
}
