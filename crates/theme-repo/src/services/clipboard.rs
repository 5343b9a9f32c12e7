//! Clipboard service for copying rendered themes.
//!
//! Copies go to an internal buffer (always), to the terminal via OSC 52,
//! and to the system clipboard via `arboard`. Neither system path reports
//! failure reliably, so a copy is considered done once the internal
//! buffer holds the text.

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use std::io::{stdout, Write};
use std::sync::Mutex;

/// Global clipboard holder. On X11 the owner must stay alive to answer
/// paste requests from other applications.
static SYSTEM_CLIPBOARD: Mutex<Option<arboard::Clipboard>> = Mutex::new(None);

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    /// Last copied text
    internal: String,
    /// When true, nothing is sent to the terminal or the system (for tests)
    internal_only: bool,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that never leaves the process.
    pub fn internal_only() -> Self {
        Self {
            internal: String::new(),
            internal_only: true,
        }
    }

    /// Copy `text` everywhere we can reach.
    pub fn copy(&mut self, text: &str) {
        self.internal = text.to_string();
        if self.internal_only {
            return;
        }

        if let Err(e) = execute!(stdout(), CopyToClipboard::to_clipboard_from(text)) {
            tracing::debug!("OSC 52 clipboard copy failed: {}", e);
        }
        let _ = stdout().flush();

        let Ok(mut guard) = SYSTEM_CLIPBOARD.lock() else {
            return;
        };
        if guard.is_none() {
            match arboard::Clipboard::new() {
                Ok(cb) => *guard = Some(cb),
                Err(e) => {
                    tracing::debug!("arboard clipboard init failed: {}", e);
                    return;
                }
            }
        }
        if let Some(clipboard) = guard.as_mut() {
            if let Err(e) = clipboard.set_text(text) {
                tracing::debug!("arboard copy failed: {}, recreating clipboard", e);
                // A stale X11 connection fails every call; start over once
                *guard = arboard::Clipboard::new().ok();
                if let Some(cb) = guard.as_mut() {
                    let _ = cb.set_text(text);
                }
            }
        }
    }

    /// The last copied text.
    pub fn get_internal(&self) -> &str {
        &self.internal
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty()
    }
}
