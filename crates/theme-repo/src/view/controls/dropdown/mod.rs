//! Dropdown selection control
//!
//! Renders as: `Label: [Selected Option ▼]`, with the option list below
//! it while open. Used for the template selector in the detail view.

mod input;
mod render;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::DropdownEvent;
pub use render::render_dropdown;

use super::FocusState;

/// State for a dropdown control
#[derive(Debug, Clone)]
pub struct DropdownState {
    /// Currently selected index
    pub selected: usize,
    /// Option labels
    pub options: Vec<String>,
    /// Label displayed before the dropdown
    pub label: String,
    /// Whether the option list is showing
    pub open: bool,
    pub focus: FocusState,
    /// Selection when the list opened, restored on cancel
    original_selected: Option<usize>,
    /// First visible option in a long list
    pub scroll_offset: usize,
    /// Options that fit below the button (updated during render)
    pub max_visible: usize,
}

impl DropdownState {
    pub fn new(options: Vec<String>, label: impl Into<String>) -> Self {
        Self {
            selected: 0,
            options,
            label: label.into(),
            open: false,
            focus: FocusState::Normal,
            original_selected: None,
            scroll_offset: 0,
            max_visible: 8,
        }
    }

    /// Preselect the option equal to `value`, if present.
    pub fn with_selected_value(mut self, value: &str) -> Self {
        if let Some(index) = self.index_of(value) {
            self.selected = index;
            self.ensure_visible();
        }
        self
    }

    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o == value)
    }

    pub fn toggle_open(&mut self) {
        self.original_selected = if self.open {
            None
        } else {
            Some(self.selected)
        };
        self.open = !self.open;
    }

    /// Close and restore the selection from when the list opened.
    pub fn cancel(&mut self) {
        if let Some(original) = self.original_selected.take() {
            self.selected = original;
        }
        self.open = false;
    }

    /// Close and keep the current selection.
    pub fn confirm(&mut self) {
        self.original_selected = None;
        self.open = false;
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
            self.ensure_visible();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.options.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.options.len() - 1);
            self.ensure_visible();
        }
    }

    /// Keep the selected option inside the visible window.
    pub fn ensure_visible(&mut self) {
        if self.max_visible == 0 || self.options.len() <= self.max_visible {
            self.scroll_offset = 0;
        } else if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.max_visible {
            self.scroll_offset = self.selected + 1 - self.max_visible;
        }
    }
}

/// Colors for the dropdown control
#[derive(Debug, Clone, Copy)]
pub struct DropdownColors {
    pub label: Color,
    pub selected: Color,
    pub border: Color,
    pub arrow: Color,
    pub option: Color,
    /// Background of the highlighted option
    pub highlight_bg: Color,
    pub focused_fg: Color,
}

impl Default for DropdownColors {
    fn default() -> Self {
        Self {
            label: Color::White,
            selected: Color::Cyan,
            border: Color::Gray,
            arrow: Color::DarkGray,
            option: Color::White,
            highlight_bg: Color::DarkGray,
            focused_fg: Color::Yellow,
        }
    }
}

/// Where the dropdown was drawn
#[derive(Debug, Clone, Default)]
pub struct DropdownLayout {
    pub button_area: Rect,
    /// One area per visible option while open
    pub option_areas: Vec<Rect>,
    pub scroll_offset: usize,
}
