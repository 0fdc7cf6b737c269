//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, Tab};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // A blocking alert swallows everything until acknowledged
    if app.has_blocking_alert() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return false;
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    if matches!(app.state, AppState::Composing) {
        handle_compose_input(app, key);
        return false;
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('1') => app.current_tab = Tab::Overview,
        KeyCode::Char('2') => app.current_tab = Tab::Activity,
        KeyCode::Char('3') => app.current_tab = Tab::Distribution,
        KeyCode::Char('4') => app.current_tab = Tab::Broadcast,
        KeyCode::Left => app.current_tab = app.current_tab.prev(),
        KeyCode::Right | KeyCode::Tab => app.current_tab = app.current_tab.next(),
        KeyCode::Char('r') => app.refresh_now(),
        KeyCode::Char('b') => app.start_compose(),
        KeyCode::Enter if app.current_tab == Tab::Broadcast => app.start_compose(),
        _ => {}
    }

    false
}

fn handle_compose_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.send_broadcast(),
        KeyCode::Esc => app.cancel_compose(),
        KeyCode::Backspace => app.pop_message_char(),
        KeyCode::Char(c) => app.push_message_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use studybot_core::Config;

    fn test_app() -> App {
        let config = Config {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        App::new(config).expect("app")
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_tab_switching() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_tab, Tab::Distribution);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_tab, Tab::Broadcast);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_tab, Tab::Overview);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_tab, Tab::Broadcast);
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut app = test_app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::ConfirmingQuit);

        assert!(!press(&mut app, KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Normal);

        press(&mut app, KeyCode::Char('q'));
        assert!(press(&mut app, KeyCode::Char('y')));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_compose_captures_typed_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.state, AppState::Composing);

        // Keys that are shortcuts elsewhere are typed into the message
        for c in "q1r".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.view.broadcast_input, "q1");
        assert_eq!(app.current_tab, Tab::Broadcast);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
        // Input survives leaving compose mode
        assert_eq!(app.session.view.broadcast_input, "q1");
    }

    #[test]
    fn test_blocking_alert_swallows_keys() {
        let mut app = test_app();
        app.session.view.blocking_alert = Some("boom".to_string());

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.current_tab, Tab::Overview);
        assert!(app.has_blocking_alert());

        press(&mut app, KeyCode::Enter);
        assert!(!app.has_blocking_alert());
    }

    #[test]
    fn test_help_overlay_toggle() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state, AppState::ShowingHelp);

        // Tab keys are ignored while help is open
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.current_tab, Tab::Overview);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
    }
}
