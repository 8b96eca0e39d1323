//! Performance line chart
//!
//! Built on `egui_plot`. Dates are plotted as days since the common era so
//! the axis formatter and the hover label can turn x values back into
//! calendar dates.

use crate::gui::theme::{AppTheme, StyleToken};
use crate::types::{ChartSeries, PerformancePoint};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Align2, FontId, Sense};
use egui_plot::{GridMark, Line, Plot, PlotPoint, PlotPoints, Points};
use std::cmp::Ordering;
use std::io::Write;
use std::ops::RangeInclusive;

const PLACEHOLDER: &str = "No performance history yet";

fn sorted_points(series: &ChartSeries) -> Vec<PerformancePoint> {
    let mut points = series.points.clone();
    points.sort_by_key(|p| p.date);
    points
}

fn day(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn date_at(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// `[day, value]` pairs in date order; non-finite values are dropped
pub fn plot_points(series: &ChartSeries) -> Vec<[f64; 2]> {
    sorted_points(series)
        .into_iter()
        .filter(|p| p.value.is_finite())
        .map(|p| [day(p.date), p.value])
        .collect()
}

/// X axis tick text
pub fn format_day_tick(x: f64) -> String {
    date_at(x).map(|d| d.format("%b %d").to_string()).unwrap_or_default()
}

/// Sample horizontally closest to `x`
pub fn nearest_point(points: &[PerformancePoint], x: f64) -> Option<PerformancePoint> {
    points
        .iter()
        .filter(|p| p.value.is_finite())
        .min_by(|a, b| {
            let da = (day(a.date) - x).abs();
            let db = (day(b.date) - x).abs();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        })
        .copied()
}

/// Hover text for the pointer at `x`
pub fn hover_label(points: &[PerformancePoint], series_id: &str, tooltip_label: &str, x: f64) -> String {
    match nearest_point(points, x) {
        Some(point) => format!(
            "{}\n{} ({})\n{:.2}",
            tooltip_label,
            point.date.format("%b %d, %Y"),
            series_id.to_uppercase(),
            point.value
        ),
        None => String::new(),
    }
}

/// Draw `series` as a line chart. Hovering shows `tooltip_label` with the
/// nearest sample.
pub fn line_chart(ui: &mut egui::Ui, theme: &AppTheme, series: &ChartSeries, tooltip_label: &str) -> egui::Response {
    let height = theme.space(StyleToken::ChartHeight);
    let line = plot_points(series);
    if line.is_empty() {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            PLACEHOLDER,
            FontId::proportional(theme.row_text_size),
            theme.text_secondary,
        );
        return response;
    }

    let samples = sorted_points(series);
    let series_id = series.id.clone();
    let label = tooltip_label.to_string();

    Plot::new(("performance_chart", series.id.as_str()))
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .x_axis_formatter(|mark: GridMark, _chars: usize, _range: &RangeInclusive<f64>| format_day_tick(mark.value))
        .y_axis_formatter(|mark: GridMark, _chars: usize, _range: &RangeInclusive<f64>| format!("{:.1}", mark.value))
        .label_formatter(move |_name: &str, pointer: &PlotPoint| hover_label(&samples, &series_id, &label, pointer.x))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(line.clone()))
                    .color(theme.chart_line)
                    .width(2.0)
                    .name(series.id.to_uppercase()),
            );
            plot_ui.points(Points::new(PlotPoints::from(line)).radius(3.0).color(theme.chart_line));
        })
        .response
}

/// Write `series` as `series,date,value` CSV rows
pub fn export_series_csv<W: Write>(series: &ChartSeries, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["series", "date", "value"])?;
    for point in sorted_points(series) {
        wtr.write_record([series.id.as_str(), &point.date.to_string(), &point.value.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_vault;

    fn point(y: i32, m: u32, d: u32, value: f64) -> PerformancePoint {
        PerformancePoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            value,
        }
    }

    fn series(points: Vec<PerformancePoint>) -> ChartSeries {
        ChartSeries { id: "dai".into(), points }
    }

    // ==== plot data tests ====

    #[test]
    fn test_empty_series_has_no_plot_points() {
        assert!(plot_points(&series(vec![])).is_empty());
    }

    #[test]
    fn test_plot_points_are_date_ordered() {
        let points = plot_points(&series(vec![point(2024, 1, 11, 3.0), point(2024, 1, 1, 1.0)]));
        assert_eq!(points.len(), 2);
        assert_eq!(points[1][0] - points[0][0], 10.0);
        assert_eq!(points[0][1], 1.0);
        assert_eq!(points[1][1], 3.0);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let points = plot_points(&series(vec![point(2024, 1, 1, f64::NAN), point(2024, 1, 2, 2.0)]));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0][1], 2.0);
    }

    #[test]
    fn test_day_tick_round_trips_date() {
        let x = day(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(format_day_tick(x), "Mar 05");
        assert_eq!(format_day_tick(x + 0.4), "Mar 05");
        assert_eq!(format_day_tick(f64::NAN), "");
    }

    // ==== hover tests ====

    #[test]
    fn test_nearest_point() {
        let points = [point(2024, 1, 1, 1.0), point(2024, 1, 6, 2.0), point(2024, 1, 11, 3.0)];
        let start = day(points[0].date);
        assert_eq!(nearest_point(&points, start - 5.0), Some(points[0]));
        assert_eq!(nearest_point(&points, start + 4.0), Some(points[1]));
        assert_eq!(nearest_point(&points, start + 40.0), Some(points[2]));
        assert_eq!(nearest_point(&[], start), None);
    }

    #[test]
    fn test_hover_label_names_series_and_sample() {
        let points = [point(2024, 5, 1, 2.0)];
        let label = hover_label(&points, "usdc", "Performance", day(points[0].date));
        assert_eq!(label, "Performance\nMay 01, 2024 (USDC)\n2.00");
        assert_eq!(hover_label(&[], "usdc", "Performance", 0.0), "");
    }

    // ==== export tests ====

    #[test]
    fn test_export_series_csv() {
        let series = ChartSeries::for_vault(&sample_vault());
        let mut buf = Vec::new();
        export_series_csv(&series, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("series,date,value"));
        assert_eq!(lines.next(), Some("usdc,2024-05-01,2"));
        assert_eq!(text.lines().count(), series.points.len() + 1);
    }

    #[test]
    fn test_export_sorts_by_date() {
        let series = series(vec![point(2024, 2, 1, 2.5), point(2024, 1, 1, 1.0)]);
        let mut buf = Vec::new();
        export_series_csv(&series, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "series,date,value\ndai,2024-01-01,1\ndai,2024-02-01,2.5\n");
    }
}
