//! Top-level UI layout — sidebar controls, price table, chart, status bar.

pub mod chart_panel;
pub mod overlays;
pub mod sidebar;
pub mod status_bar;
pub mod table_panel;
pub mod widgets;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{AppState, Overlay};
use crate::theme::{self, Theme};

pub const TITLE: &str = "Stock Prices Dashboard";

/// Width of the control sidebar.
const SIDEBAR_WIDTH: u16 = 34;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(
        Block::default().style(Style::default().bg(Theme::default().background)),
        f.area(),
    );

    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(main_area);

    sidebar::render(f, columns[0], app);
    draw_outputs(f, columns[1], app);
    status_bar::render(f, status_area, app);

    if app.overlay == Overlay::Help {
        overlays::render_help(f, main_area);
    }
}

/// Subheading naming the lookback window.
pub fn subheading(days: u32) -> String {
    format!("Past {days} days")
}

/// Subheading, then table above chart, or the error banner in their place.
fn draw_outputs(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" {TITLE} "))
        .title_style(theme::accent_bold());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [heading_area, body] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .areas(inner);
    let heading = Span::styled(subheading(app.params.days.days()), theme::neutral());
    f.render_widget(Paragraph::new(Line::from(heading)), heading_area);

    if let Some(message) = app.output.error_message() {
        render_banner(f, body, message);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(6)])
        .split(body);

    table_panel::render(f, rows[0], app);
    chart_panel::render(f, rows[1], app);
}

fn render_banner(f: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::negative())),
        Line::from(""),
        Line::from(Span::styled(
            "Adjust the controls or press r to retry.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_helpers::{failing_app, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    /// Render the whole UI and flatten the buffer into one string per row.
    pub(crate) fn render_to_lines(app: &AppState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    fn screen_contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|l| l.contains(needle))
    }

    #[test]
    fn dashboard_shows_title_and_selected_rows() {
        let app = test_app();
        let lines = render_to_lines(&app, 140, 40);
        assert!(screen_contains(&lines, TITLE));
        for name in ["amazon", "apple", "google", "meta"] {
            assert!(screen_contains(&lines, name), "missing {name}");
        }
        assert!(screen_contains(&lines, "29 March 2024"));
    }

    #[test]
    fn headings_follow_lookback_window() {
        let mut app = test_app();
        let lines = render_to_lines(&app, 140, 40);
        assert!(screen_contains(&lines, "Past 20 days"));
        assert!(screen_contains(&lines, table_panel::TABLE_HEADING));

        app.step_days(1);
        let lines = render_to_lines(&app, 140, 40);
        assert!(screen_contains(&lines, "Past 21 days"));
        assert!(!screen_contains(&lines, "Past 20 days"));
    }

    #[test]
    fn frame_is_painted_with_theme_background() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, &test_app())).unwrap();
        let buf = terminal.backend().buffer();
        assert_eq!(buf[(59, 19)].bg, Theme::default().background);
    }

    #[test]
    fn empty_selection_shows_banner_instead_of_table() {
        let mut app = test_app();
        app.clear_selection();
        let lines = render_to_lines(&app, 140, 40);
        assert!(screen_contains(&lines, "Please select at least one company."));
        assert!(!screen_contains(&lines, "29 March 2024"));
    }

    #[test]
    fn provider_failure_shows_generic_banner() {
        let app = failing_app();
        let lines = render_to_lines(&app, 140, 40);
        assert!(screen_contains(&lines, "An error occurred. Please try again."));
    }

    #[test]
    fn help_overlay_draws_on_top() {
        let mut app = test_app();
        app.overlay = Overlay::Help;
        let lines = render_to_lines(&app, 140, 40);
        assert!(screen_contains(&lines, "Keyboard"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = test_app();
        render_to_lines(&app, 20, 6);
    }

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 40, area);
        assert!(r.x >= area.x && r.right() <= area.right());
        assert!(r.y >= area.y && r.bottom() <= area.bottom());
    }
}
