//! Closing-price line chart, one series per selected company.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType};

use stockboard_core::{ChartSpec, LongTable, TickerRegistry, WidePriceTable};

use crate::app::AppState;
use crate::theme;

/// Chart points for one company: (date index in `table`, price).
pub struct Series {
    pub name: String,
    pub color_index: usize,
    pub points: Vec<(f64, f64)>,
}

/// One series per company in `long`, x = column index of the date in `table`.
pub fn build_series(
    long: &LongTable,
    table: &WidePriceTable,
    registry: &TickerRegistry,
) -> Vec<Series> {
    let names = registry.names();
    long.names()
        .into_iter()
        .map(|name| {
            let points = long
                .series(name)
                .into_iter()
                .filter_map(|(date, price)| {
                    table
                        .dates()
                        .binary_search(&date)
                        .ok()
                        .map(|x| (x as f64, price))
                })
                .collect();
            Series {
                name: name.to_string(),
                color_index: names.iter().position(|n| *n == name).unwrap_or(0),
                points,
            }
        })
        .collect()
}

/// Y bounds for the terminal chart. A zero-height domain is widened by one
/// dollar so the axis stays drawable.
pub fn y_bounds(spec: &ChartSpec) -> [f64; 2] {
    let (lo, hi) = spec.y_domain;
    if hi > lo { [lo, hi] } else { [lo, lo + 1.0] }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if area.height < 3 || area.width < 10 {
        return;
    }
    let (Some(long), Some(table), Some(spec)) = (
        app.output.long.as_ref(),
        app.output.table.as_ref(),
        app.output.chart.as_ref(),
    ) else {
        return;
    };

    let series = build_series(long, table, app.registry());
    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name.as_str())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::series_color(s.color_index)))
                .graph_type(GraphType::Line)
                .data(&s.points)
        })
        .collect();

    let labels = table.date_labels();
    let x_max = labels.len().saturating_sub(1) as f64;
    let x_labels = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) if labels.len() > 1 => vec![
            Span::styled(first.clone(), theme::muted()),
            Span::styled(last.clone(), theme::muted()),
        ],
        (Some(only), _) => vec![Span::styled(only.clone(), theme::muted())],
        _ => Vec::new(),
    };
    let [y_min, y_max] = y_bounds(spec);

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled(spec.x_field, theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(spec.y_field, theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{:.0}", (y_min + y_max) / 2.0), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
