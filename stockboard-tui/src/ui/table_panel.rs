//! Wide price table: one row per selected company, one column per date.
//!
//! When the dates do not fit, the most recent ones are shown.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use stockboard_core::WidePriceTable;
use stockboard_core::table::NAME_COLUMN;

use crate::app::AppState;
use crate::theme::{self, Theme};

const NAME_WIDTH: u16 = 10;
/// Fits the longest label, "30 September 2024".
const DATE_WIDTH: u16 = 17;
const COLUMN_SPACING: u16 = 1;

/// How many date columns fit in `width` cells.
pub fn visible_date_columns(width: u16, total: usize) -> usize {
    let available = width.saturating_sub(NAME_WIDTH + COLUMN_SPACING);
    let fit = (available / (DATE_WIDTH + COLUMN_SPACING)) as usize;
    fit.max(1).min(total)
}

/// Heading over the wide price table.
pub const TABLE_HEADING: &str = "Stock Prices (USD)";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(table) = app.output.table.as_ref() else {
        return;
    };
    let (rows, cols) = table.shape();

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme::muted())
        .title(Span::styled(
            format!(" {TABLE_HEADING}: {rows} companies x {cols} dates "),
            theme::neutral(),
        ));
    let inner_width = block.inner(area).width;

    let shown = visible_date_columns(inner_width, cols);
    f.render_widget(build_table(table, cols - shown).block(block), area);
}

fn build_table(table: &WidePriceTable, skip: usize) -> Table<'static> {
    let labels = table.date_labels();
    let mut header = vec![Cell::from(NAME_COLUMN).style(theme::accent_bold())];
    header.extend(
        labels
            .into_iter()
            .skip(skip)
            .map(|l| Cell::from(l).style(theme::accent_bold())),
    );

    let body: Vec<Row> = table
        .rows()
        .map(|(name, cells)| {
            let last_style = window_change(cells)
                .map(|change| Style::default().fg(Theme::default().change_color(change)))
                .unwrap_or_else(theme::text);
            let last = cells.len().saturating_sub(1);
            let mut row = vec![Cell::from(name.to_string()).style(theme::text())];
            row.extend(cells.iter().enumerate().skip(skip).map(|(i, c)| match c {
                Some(price) if i == last => Cell::from(format!("{price:.2}")).style(last_style),
                Some(price) => Cell::from(format!("{price:.2}")).style(theme::text()),
                None => Cell::from("").style(theme::muted()),
            }));
            Row::new(row)
        })
        .collect();

    let mut widths = vec![Constraint::Length(NAME_WIDTH)];
    let date_columns = table.dates().len() - skip;
    widths.extend(std::iter::repeat(Constraint::Length(DATE_WIDTH)).take(date_columns));

    Table::new(body, widths)
        .header(Row::new(header))
        .column_spacing(COLUMN_SPACING)
}

/// Last close minus first close of a row, if it has two or more closes.
fn window_change(cells: &[Option<f64>]) -> Option<f64> {
    let mut populated = cells.iter().flatten();
    let first = populated.next()?;
    let last = populated.last()?;
    Some(last - first)
}
