//! Labeled horizontal slider widget.
//!
//! Two lines: the label with the current value, then a `[====    ]` track
//! spanning the full width.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::theme;

pub struct Slider<'a> {
    label: &'a str,
    value: f64,
    min: f64,
    max: f64,
    focused: bool,
}

impl<'a> Slider<'a> {
    pub fn new(label: &'a str, value: f64, min: f64, max: f64) -> Self {
        Self {
            label,
            value,
            min,
            max,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Track string of `width` cells including the brackets.
pub fn track(value: f64, min: f64, max: f64, width: usize) -> String {
    let inner = width.saturating_sub(2);
    let range = max - min;
    if range <= 0.0 {
        return format!("[{}]", "=".repeat(inner));
    }
    let frac = ((value - min) / range).clamp(0.0, 1.0);
    let filled = (frac * inner as f64).round() as usize;
    let empty = inner.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}

impl Widget for Slider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let (marker, label_style, track_style) = if self.focused {
            ("▸ ", theme::accent_bold(), theme::accent())
        } else {
            ("  ", theme::text(), theme::muted())
        };

        let header = Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(self.label, label_style),
            Span::raw(": "),
            Span::styled(format!("{:.0}", self.value), theme::positive()),
        ]);
        let bar = Line::from(Span::styled(
            format!(
                "  {}",
                track(self.value, self.min, self.max, area.width.saturating_sub(2) as usize)
            ),
            track_style,
        ));

        Paragraph::new(vec![header, bar]).render(area, buf);
    }
}
