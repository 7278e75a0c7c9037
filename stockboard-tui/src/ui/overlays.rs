//! Overlay widgets — keyboard help.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme;
use crate::ui::centered_rect;

const BINDINGS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "Move focus between controls"),
    ("h / l, ← / →", "Adjust the focused slider"),
    ("Shift + h / l", "Adjust in large steps"),
    ("j / k, ↓ / ↑", "Move in the company list"),
    ("Space / Enter", "Toggle the company under the cursor"),
    ("a / n", "Select all / no companies"),
    ("r", "Re-run (retries a failed fetch)"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keyboard ")
        .title_style(theme::accent_bold());

    let mut text = vec![Line::from("")];
    for (keys, action) in BINDINGS {
        text.push(Line::from(vec![
            Span::styled(format!("  {keys:<18}"), theme::accent()),
            Span::styled(*action, theme::text()),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "  The price range sets the chart's y-axis only; it never hides data.",
        theme::muted(),
    )));
    text.push(Line::from(Span::styled("  Esc to close", theme::neutral())));

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}
