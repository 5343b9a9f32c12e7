//! Key bindings.
//!
//! | context  | keys                                                      |
//! |----------|-----------------------------------------------------------|
//! | anywhere | Ctrl+C quit, `d` dismiss notification                     |
//! | gallery  | arrows / `hjkl` move, Enter open, `r` reload, `q` quit    |
//! | detail   | Esc / `q` close, Tab / `t` template, `c` / `y` copy, scroll |
//! | dropdown | Up/Down select, Enter confirm, Esc cancel                 |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use theme_repo_core::TemplateId;

use super::{App, PAGE_SCROLL};
use crate::view::controls::dropdown::DropdownEvent;

impl App {
    /// Handle one key press. Returns true if the screen may have changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.template_picker.is_some() {
            return self.handle_picker_key(key);
        }

        if key.code == KeyCode::Char('d') && !self.notifications.is_empty() {
            self.dismiss_notification();
            return true;
        }

        if self.detail.is_open() {
            self.handle_detail_key(key)
        } else {
            self.handle_gallery_key(key)
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> bool {
        let Some(picker) = self.template_picker.as_mut() else {
            return false;
        };
        match picker.handle_key(key) {
            Some(DropdownEvent::Confirmed(_)) => {
                let chosen = picker.selected_option().map(TemplateId::from);
                self.template_picker = None;
                if let Some(template) = chosen {
                    self.select_template(template);
                }
                true
            }
            Some(DropdownEvent::Cancelled) => {
                self.template_picker = None;
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_detail(),
            KeyCode::Tab | KeyCode::Char('t') => self.open_template_picker(),
            KeyCode::Char('c') | KeyCode::Char('y') => self.copy_rendered(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_detail(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_detail(1),
            KeyCode::PageUp => self.scroll_detail(-(PAGE_SCROLL as i32)),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_detail(PAGE_SCROLL as i32),
            KeyCode::Home | KeyCode::Char('g') => self.detail_scroll = 0,
            _ => return false,
        }
        true
    }

    fn handle_gallery_key(&mut self, key: KeyEvent) -> bool {
        let columns = self.gallery_layout.columns.max(1) as isize;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.themes.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.themes.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.themes.move_selection(-columns),
            KeyCode::Down | KeyCode::Char('j') => self.themes.move_selection(columns),
            KeyCode::Home => self.themes.select(0),
            KeyCode::End => self.themes.select(self.themes.len().saturating_sub(1)),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => return false,
        }
        true
    }

    fn scroll_detail(&mut self, delta: i32) {
        let max = self
            .detail
            .rendered()
            .map(|r| r.line_count().saturating_sub(1))
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16;
        let next = (self.detail_scroll as i32 + delta).clamp(0, max as i32);
        self.detail_scroll = next as u16;
    }
}
