use theme_repo_core::detail::RenderOutcome;
use theme_repo_core::Notification;

use super::App;
use crate::services::async_bridge::AsyncMessage;

impl App {
    /// Apply every finished request. Returns true if anything arrived.
    pub fn process_async_messages(&mut self) -> bool {
        let messages = self.bridge.try_recv_all();
        if messages.is_empty() {
            return false;
        }
        for message in messages {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.handle_async_message(message);
        }
        true
    }

    fn handle_async_message(&mut self, message: AsyncMessage) {
        match message {
            AsyncMessage::ThemesLoaded(result) => match self.themes.resolve(result) {
                Ok(count) => tracing::info!("Loaded {} themes", count),
                Err(err) => self.notify(Notification::from(&err)),
            },
            AsyncMessage::TemplatesLoaded(result) => match self.catalog.resolve(result) {
                Ok(count) => tracing::debug!("Template catalog has {} entries", count),
                Err(err) => self.notify(Notification::from(&err)),
            },
            AsyncMessage::ThemeRendered { ticket, result } => {
                match self.detail.resolve(&ticket, result) {
                    RenderOutcome::Applied => {
                        tracing::debug!("Render #{} applied", ticket.seq);
                        self.detail_scroll = 0;
                    }
                    RenderOutcome::Stale => {
                        tracing::debug!(
                            "Dropping superseded render #{} for {} / {}",
                            ticket.seq,
                            ticket.key.theme,
                            ticket.key.template
                        );
                    }
                    RenderOutcome::Failed(err) => self.notify(Notification::from(&err)),
                }
            }
        }
    }
}
