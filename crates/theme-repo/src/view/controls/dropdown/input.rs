//! Keyboard handling for the dropdown control

use crossterm::event::{KeyCode, KeyEvent};

use super::{DropdownState, FocusState};

/// What a key did to the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownEvent {
    Opened,
    /// Closed with the current selection accepted
    Confirmed(usize),
    /// Closed with the original selection restored
    Cancelled,
    /// Highlight moved while open
    SelectionChanged(usize),
}

impl DropdownState {
    /// Handle a key press. Returns `None` when the key was not for us.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DropdownEvent> {
        if self.focus != FocusState::Focused && !self.open {
            return None;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.open {
                    self.confirm();
                    Some(DropdownEvent::Confirmed(self.selected))
                } else {
                    self.toggle_open();
                    Some(DropdownEvent::Opened)
                }
            }
            KeyCode::Esc if self.open => {
                self.cancel();
                Some(DropdownEvent::Cancelled)
            }
            KeyCode::Up | KeyCode::Char('k') if self.open => {
                self.select_prev();
                Some(DropdownEvent::SelectionChanged(self.selected))
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab if self.open => {
                self.select_next();
                Some(DropdownEvent::SelectionChanged(self.selected))
            }
            KeyCode::Home if self.open && !self.options.is_empty() => {
                self.selected = 0;
                self.ensure_visible();
                Some(DropdownEvent::SelectionChanged(0))
            }
            KeyCode::End if self.open && !self.options.is_empty() => {
                self.selected = self.options.len() - 1;
                self.ensure_visible();
                Some(DropdownEvent::SelectionChanged(self.selected))
            }
            _ => None,
        }
    }
}
