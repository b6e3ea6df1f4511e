//! Keyboard handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::App;

impl App {
    /// Handle a key press. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ignore key release events reported by enhanced keyboard protocols
        if key.kind == KeyEventKind::Release {
            return false;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') = key.code {
                self.quit();
                return true;
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('r') => self.reveal(),
            KeyCode::Char('m') => self.cycle_mode(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            _ => return false,
        }
        true
    }
}
