//! Last-request-wins bookkeeping for render fetches.
//!
//! Every render fetch is issued with a [`RenderTicket`] carrying a
//! sequence number that only ever grows. When a result comes back it is
//! accepted only if its ticket is still the active one; anything else was
//! superseded while in flight and is dropped. In-flight requests are never
//! cancelled, only ignored.

use crate::template::TemplateId;

/// The (theme, template) pair a render fetch is for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderKey {
    pub theme: String,
    pub template: TemplateId,
}

impl RenderKey {
    pub fn new(theme: impl Into<String>, template: TemplateId) -> Self {
        Self {
            theme: theme.into(),
            template,
        }
    }
}

/// Token attached to one render fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    pub seq: u64,
    pub key: RenderKey,
}

#[derive(Debug, Default)]
pub struct RenderSequencer {
    next_seq: u64,
    active: Option<RenderTicket>,
}

impl RenderSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `key`, superseding whatever was active.
    pub fn issue(&mut self, key: RenderKey) -> RenderTicket {
        self.next_seq += 1;
        let ticket = RenderTicket {
            seq: self.next_seq,
            key,
        };
        self.active = Some(ticket.clone());
        ticket
    }

    /// Key of the last issued fetch, if any is still tracked.
    pub fn last_key(&self) -> Option<&RenderKey> {
        self.active.as_ref().map(|t| &t.key)
    }

    /// Whether a result for `ticket` may still be applied.
    pub fn is_current(&self, ticket: &RenderTicket) -> bool {
        self.active.as_ref() == Some(ticket)
    }

    /// Forget the active ticket. Results for earlier tickets become stale;
    /// sequence numbers keep growing so they stay stale.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Total tickets issued so far.
    pub fn issued(&self) -> u64 {
        self.next_seq
    }
}
