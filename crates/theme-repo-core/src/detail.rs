//! State of the theme detail view.
//!
//! The fetch rule is explicit: a render fetch is issued iff the view is
//! open and the (theme, template) key differs from the key of the last
//! fetch. Closing forgets the last key, so every open fetches again.

use crate::error::FetchError;
use crate::render::{RenderResponse, RenderedText};
use crate::request::{RenderKey, RenderSequencer, RenderTicket};
use crate::template::TemplateId;
use crate::theme::ThemeSummary;
use std::sync::Arc;

/// What happened to a render result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The result was current and is now displayed.
    Applied,
    /// A newer request (or a close) superseded it; nothing changed.
    Stale,
    /// The result was current but failed. The previous text stays up.
    Failed(FetchError),
}

#[derive(Debug, Default)]
pub struct ThemeDetail {
    theme: Option<Arc<ThemeSummary>>,
    open: bool,
    template: TemplateId,
    rendered: Option<RenderedText>,
    sequencer: RenderSequencer,
    pending: bool,
}

impl ThemeDetail {
    /// A closed detail view with `default_template` preselected.
    pub fn new(default_template: TemplateId) -> Self {
        Self {
            template: default_template,
            ..Self::default()
        }
    }

    /// Open the view for `theme`. Returns the render fetch to issue.
    pub fn open(&mut self, theme: Arc<ThemeSummary>) -> Option<RenderTicket> {
        let switching = self
            .theme
            .as_ref()
            .is_some_and(|current| current.name != theme.name);
        if switching {
            self.rendered = None;
        }
        self.theme = Some(theme);
        self.open = true;
        self.sync()
    }

    /// Close the view. In-flight results become stale and the rendered
    /// text is dropped; the template selection is kept.
    pub fn close(&mut self) {
        self.open = false;
        self.rendered = None;
        self.pending = false;
        self.sequencer.reset();
    }

    /// Change the selected template. Returns the render fetch to issue, if
    /// the view is open and the selection actually changed.
    pub fn select_template(&mut self, template: TemplateId) -> Option<RenderTicket> {
        self.template = template;
        self.sync()
    }

    /// Apply a render result.
    pub fn resolve(
        &mut self,
        ticket: &RenderTicket,
        result: Result<RenderResponse, FetchError>,
    ) -> RenderOutcome {
        if !self.open || !self.sequencer.is_current(ticket) {
            return RenderOutcome::Stale;
        }
        self.pending = false;

        let text = result.and_then(|response| response.into_display_text(&ticket.key.template));
        match text {
            Ok(text) => {
                self.rendered = Some(RenderedText {
                    theme: ticket.key.theme.clone(),
                    template: ticket.key.template.clone(),
                    text,
                });
                RenderOutcome::Applied
            }
            Err(err) => RenderOutcome::Failed(err),
        }
    }

    fn sync(&mut self) -> Option<RenderTicket> {
        if !self.open {
            return None;
        }
        let theme = self.theme.as_ref()?;
        let key = RenderKey::new(theme.name.clone(), self.template.clone());
        if self.sequencer.last_key() == Some(&key) {
            return None;
        }
        self.pending = true;
        Some(self.sequencer.issue(key))
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn theme(&self) -> Option<&Arc<ThemeSummary>> {
        self.theme.as_ref().filter(|_| self.open)
    }

    pub fn template(&self) -> &TemplateId {
        &self.template
    }

    pub fn rendered(&self) -> Option<&RenderedText> {
        self.rendered.as_ref()
    }

    /// Exactly the text on screen, for copy-to-clipboard.
    pub fn displayed_text(&self) -> Option<&str> {
        self.rendered.as_ref().map(|r| r.text.as_str())
    }

    /// Whether the latest render fetch has not resolved yet.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Render fetches issued over the lifetime of this view.
    pub fn fetches_issued(&self) -> u64 {
        self.sequencer.issued()
    }
}
