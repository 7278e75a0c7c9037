//! Sidebar controls: lookback slider, price range sliders, company picker.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use stockboard_core::pipeline::{MAX_DAYS, MIN_DAYS, PRICE_CEILING, PRICE_FLOOR};

use crate::app::{AppState, Focus};
use crate::theme;
use crate::ui::widgets::Slider;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Controls ")
        .title_style(theme::panel_title(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(inner);

    let params = &app.params;
    f.render_widget(
        Slider::new("Days", params.days.days() as f64, MIN_DAYS as f64, MAX_DAYS as f64)
            .focused(app.focus == Focus::Days),
        rows[0],
    );
    f.render_widget(
        Slider::new("Min price", params.price_range.lo(), PRICE_FLOOR, PRICE_CEILING)
            .focused(app.focus == Focus::PriceMin),
        rows[1],
    );
    f.render_widget(
        Slider::new("Max price", params.price_range.hi(), PRICE_FLOOR, PRICE_CEILING)
            .focused(app.focus == Focus::PriceMax),
        rows[2],
    );

    render_companies(f, rows[3], app);
}

fn render_companies(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Companies;
    let title_style = if focused { theme::accent_bold() } else { theme::text() };
    let mut lines = vec![Line::from(vec![
        Span::styled(if focused { "▸ " } else { "  " }, theme::accent()),
        Span::styled("Companies", title_style),
        Span::styled(format!(" ({})", app.params.selection.len()), theme::muted()),
    ])];

    for (i, entry) in app.registry().entries().iter().enumerate() {
        let checked = app.is_selected(&entry.name);
        let is_cursor = focused && i == app.company_cursor;
        let marker = if is_cursor { "> " } else { "  " };
        let check = if checked { "[x] " } else { "[ ] " };
        let style = if is_cursor {
            theme::accent_bold()
        } else if checked {
            theme::text()
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(check, style),
            Span::styled(
                format!("{:<10}", entry.name),
                style.fg(theme::series_color(i)),
            ),
            Span::styled(entry.ticker.clone(), theme::muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}
