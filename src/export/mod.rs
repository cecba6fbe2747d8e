pub mod dashboard_report;

use rust_xlsxwriter::{
    Chart, ChartFormat, ChartLine, ChartMarker, ChartMarkerType, ChartPoint, ChartSolidFill,
    ChartType, Format, FormatBorder,
};

use crate::config::CurrencyConfig;

/// Highlight colour for the leading bar of ranked charts.
pub const HIGHLIGHT_COLOR: &str = "#90CAF9";
/// Colour of the remaining bars.
pub const MUTED_COLOR: &str = "#D3D3D3";
/// Line colour of the monthly trend charts.
pub const TREND_COLOR: &str = "#00F6A8";

/// Header: blue #2C5F8A, white bold text, thin border
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

/// Date yyyy-mm-dd
pub fn create_date_format() -> Format {
    Format::new().set_num_format("yyyy-mm-dd")
}

/// Decimal #,##0.00
pub fn create_number_format() -> Format {
    Format::new().set_num_format("#,##0.00")
}

/// Integer #,##0
pub fn create_integer_format() -> Format {
    Format::new().set_num_format("#,##0")
}

/// Amount prefixed with the configured currency symbol, e.g. `"R$" #,##0.00`.
/// Excel applies its own locale separators.
pub fn create_currency_format(currency: &CurrencyConfig) -> Format {
    let symbol = currency.symbol.replace('"', "");
    Format::new().set_num_format(format!("\"{symbol}\" #,##0.00"))
}

/// Data rows `first_row..=last_row` (0-based) of a sheet: labels in
/// `category_col`, plotted values in `value_col`.
pub struct SeriesRange<'a> {
    pub sheet: &'a str,
    pub first_row: u32,
    pub last_row: u32,
    pub category_col: u16,
    pub value_col: u16,
}

/// Line chart with circle markers, legend hidden.
pub fn trend_line_chart(range: &SeriesRange<'_>, title: &str, color: &str, width: f64) -> Chart {
    let mut chart = Chart::new(ChartType::Line);
    chart
        .add_series()
        .set_name(title)
        .set_categories((
            range.sheet,
            range.first_row,
            range.category_col,
            range.last_row,
            range.category_col,
        ))
        .set_values((
            range.sheet,
            range.first_row,
            range.value_col,
            range.last_row,
            range.value_col,
        ))
        .set_format(ChartFormat::new().set_line(ChartLine::new().set_color(color).set_width(width)))
        .set_marker(ChartMarker::new().set_type(ChartMarkerType::Circle));
    chart.title().set_name(title);
    chart.legend().set_hidden();
    chart
}

/// Horizontal bar chart with the first bar highlighted and the others muted.
pub fn ranked_bar_chart(range: &SeriesRange<'_>, title: &str, axis_title: &str) -> Chart {
    let bars = (range.last_row - range.first_row + 1) as usize;
    let points: Vec<ChartPoint> = (0..bars)
        .map(|i| {
            let color = if i == 0 { HIGHLIGHT_COLOR } else { MUTED_COLOR };
            ChartPoint::new()
                .set_format(ChartFormat::new().set_solid_fill(ChartSolidFill::new().set_color(color)))
        })
        .collect();

    let mut chart = Chart::new(ChartType::Bar);
    chart
        .add_series()
        .set_name(title)
        .set_categories((
            range.sheet,
            range.first_row,
            range.category_col,
            range.last_row,
            range.category_col,
        ))
        .set_values((
            range.sheet,
            range.first_row,
            range.value_col,
            range.last_row,
            range.value_col,
        ))
        .set_points(&points);
    chart.title().set_name(title);
    chart.y_axis().set_name(axis_title);
    // Excel draws the first category at the bottom; flip so rank 1 is on top.
    chart.x_axis().set_reverse();
    chart.legend().set_hidden();
    chart
}
