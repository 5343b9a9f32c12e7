//! Bridge between background fetches and the UI thread.
//!
//! Fetches run on the tokio runtime and report back by sending an
//! [`AsyncMessage`] through a plain `std::sync::mpsc` channel. The UI loop
//! drains it without blocking once per iteration.

use std::sync::mpsc;
use theme_repo_core::render::RenderResponse;
use theme_repo_core::request::RenderTicket;
use theme_repo_core::{FetchError, TemplateId, ThemeSummary};

/// Result of one backend request.
#[derive(Debug)]
pub enum AsyncMessage {
    /// `GET /themes` finished
    ThemesLoaded(Result<Vec<ThemeSummary>, FetchError>),

    /// `GET /templates` finished
    TemplatesLoaded(Result<Vec<TemplateId>, FetchError>),

    /// A render fetch finished. The ticket decides whether it still counts.
    ThemeRendered {
        ticket: RenderTicket,
        result: Result<RenderResponse, FetchError>,
    },
}

#[derive(Debug)]
pub struct AsyncBridge {
    sender: mpsc::Sender<AsyncMessage>,
    receiver: mpsc::Receiver<AsyncMessage>,
}

impl Default for AsyncBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncBridge {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// A sender to move into a background task.
    pub fn sender(&self) -> mpsc::Sender<AsyncMessage> {
        self.sender.clone()
    }

    /// Every message that has arrived so far, in arrival order.
    pub fn try_recv_all(&self) -> Vec<AsyncMessage> {
        self.receiver.try_iter().collect()
    }
}
