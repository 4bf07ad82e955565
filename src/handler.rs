use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Route one key press to the application.
///
/// The failure notice behaves like a blocking notification: while it is
/// shown, Enter or Esc dismisses it and every other key is swallowed.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if app.exchange.last_error().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_error();
        }
        return;
    }

    // Control chords first, so they never fall through to text input.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('t') => app.toggle_theme(),
            KeyCode::Char('u') => app.scroll_up(app.chat_height / 2),
            KeyCode::Char('d') => app.scroll_down(app.chat_height / 2),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.submit(),

        KeyCode::PageUp => app.scroll_up(app.chat_height.max(1)),
        KeyCode::PageDown => app.scroll_down(app.chat_height.max(1)),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),

        KeyCode::Backspace => app.delete_back(),
        KeyCode::Delete => app.delete_forward(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),

        KeyCode::Char(c) => app.insert_char(c),

        _ => {}
    }
}
