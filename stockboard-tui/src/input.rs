//! Keyboard input dispatch — overlays → global keys → focused-control handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus, Overlay, PRICE_STEP, PRICE_STEP_LARGE};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::Help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter
        ) {
            app.overlay = Overlay::None;
        }
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('r') => {
            app.refresh();
            return;
        }
        KeyCode::Tab => {
            app.focus = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus.prev()
            } else {
                app.focus.next()
            };
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    // 3. Focused control.
    let large = key.modifiers.contains(KeyModifiers::SHIFT);
    match app.focus {
        Focus::Days => {
            let step = if large { 5 } else { 1 };
            match key.code {
                KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Right => app.step_days(step),
                KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Left => app.step_days(-step),
                _ => {}
            }
        }
        Focus::PriceMin | Focus::PriceMax => {
            let step = if large { PRICE_STEP_LARGE } else { PRICE_STEP };
            let delta = match key.code {
                KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Right => step,
                KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Left => -step,
                _ => return,
            };
            if app.focus == Focus::PriceMin {
                app.shift_price_min(delta);
            } else {
                app.shift_price_max(delta);
            }
        }
        Focus::Companies => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.move_cursor(true),
            KeyCode::Char('k') | KeyCode::Up => app.move_cursor(false),
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_cursor_company(),
            KeyCode::Char('a') => app.select_all(),
            KeyCode::Char('n') => app.clear_selection(),
            _ => {}
        },
    }
}
