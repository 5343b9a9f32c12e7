//! The theme summary list behind the gallery.

use crate::error::FetchError;
use crate::theme::ThemeSummary;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Owns the fetched summaries. Cards and the detail view hold `Arc`
/// references into it rather than copies.
#[derive(Debug, Default)]
pub struct ThemeList {
    status: ListStatus,
    themes: Vec<Arc<ThemeSummary>>,
    selected: usize,
}

impl ThemeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `Loading` on first display. Returns `true` when the caller
    /// should issue the `/themes` request.
    pub fn begin_load(&mut self) -> bool {
        if self.status != ListStatus::Idle {
            return false;
        }
        self.status = ListStatus::Loading;
        true
    }

    /// User-triggered reload. Drops the current content and goes back to
    /// `Loading`, unless a request is already in flight.
    pub fn reload(&mut self) -> bool {
        if self.status == ListStatus::Loading {
            return false;
        }
        self.themes.clear();
        self.selected = 0;
        self.status = ListStatus::Loading;
        true
    }

    /// Apply the `/themes` result. On success the themes are sorted by
    /// name and the count is returned; on failure the list stays empty and
    /// the error is handed back for notification.
    pub fn resolve(
        &mut self,
        result: Result<Vec<ThemeSummary>, FetchError>,
    ) -> Result<usize, FetchError> {
        match result {
            Ok(mut themes) => {
                themes.sort_by(ThemeSummary::cmp_by_name);
                self.themes = themes.into_iter().map(Arc::new).collect();
                self.selected = 0;
                self.status = ListStatus::Loaded;
                Ok(self.themes.len())
            }
            Err(err) => {
                self.themes.clear();
                self.selected = 0;
                self.status = ListStatus::Failed;
                Err(err)
            }
        }
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    pub fn themes(&self) -> &[Arc<ThemeSummary>] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Arc<ThemeSummary>> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Arc<ThemeSummary>> {
        self.themes.get(self.selected)
    }

    /// Move the selection by `delta` cards, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        if self.themes.is_empty() {
            return;
        }
        let last = self.themes.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    pub fn select(&mut self, index: usize) {
        if index < self.themes.len() {
            self.selected = index;
        }
    }
}
