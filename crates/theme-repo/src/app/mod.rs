//! The gallery application controller.
//!
//! `App` owns every piece of state: the theme list, the template catalog,
//! the detail view and the notification channel. Backend requests run on a
//! tokio runtime and come back through the [`AsyncBridge`]; the UI loop
//! calls [`App::process_async_messages`], [`App::handle_key`],
//! [`App::tick`] and [`App::render`].

mod async_messages;
mod input;

use anyhow::{Context, Result as AnyhowResult};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::sync::Arc;
use theme_repo_core::catalog::TemplateCatalog;
use theme_repo_core::detail::ThemeDetail;
use theme_repo_core::gallery::ThemeList;
use theme_repo_core::request::RenderTicket;
use theme_repo_core::{Notification, NotificationChannel, Severity, TemplateId, ThemeSummary};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::services::async_bridge::{AsyncBridge, AsyncMessage};
use crate::services::backend::Backend;
use crate::services::clipboard::Clipboard;
use crate::services::time_source::SharedTimeSource;
use crate::view::color::{convert_buffer_colors, ColorCapability};
use crate::view::controls::dropdown::DropdownState;
use crate::view::controls::FocusState;
use crate::view::gallery::GalleryLayout;
use crate::view::{detail, gallery, notification};

/// Rows moved by PageUp/PageDown in the detail view
const PAGE_SCROLL: u16 = 10;

pub struct App {
    backend: Arc<dyn Backend>,
    runtime: Option<Runtime>,
    bridge: AsyncBridge,
    time_source: SharedTimeSource,
    clipboard: Clipboard,
    color_capability: ColorCapability,

    themes: ThemeList,
    catalog: TemplateCatalog,
    detail: ThemeDetail,
    notifications: NotificationChannel,

    /// Template dropdown, while the user is choosing
    template_picker: Option<DropdownState>,
    detail_scroll: u16,
    /// Cards drawn by the last frame
    gallery_layout: GalleryLayout,
    /// Requests sent whose result has not been processed yet
    in_flight: usize,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        backend: Arc<dyn Backend>,
        time_source: SharedTimeSource,
    ) -> AnyhowResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(8)
            .thread_name("theme-repo-fetch")
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;

        Ok(Self {
            backend,
            runtime: Some(runtime),
            bridge: AsyncBridge::new(),
            time_source,
            clipboard: Clipboard::new(),
            color_capability: ColorCapability::TrueColor,
            themes: ThemeList::new(),
            catalog: TemplateCatalog::new(),
            detail: ThemeDetail::new(config.default_template.clone()),
            notifications: NotificationChannel::new(config.notification_timeout()),
            template_picker: None,
            detail_scroll: 0,
            gallery_layout: GalleryLayout::default(),
            in_flight: 0,
            should_quit: false,
        })
    }

    pub fn set_clipboard(&mut self, clipboard: Clipboard) {
        self.clipboard = clipboard;
    }

    pub fn set_color_capability(&mut self, capability: ColorCapability) {
        self.color_capability = capability;
    }

    /// First display: request the theme list.
    pub fn start(&mut self) {
        if self.themes.begin_load() {
            tracing::info!("Loading themes");
            self.spawn_fetch(|backend| AsyncMessage::ThemesLoaded(backend.list_themes()));
        }
    }

    /// Drop the current list and fetch it again.
    pub fn reload(&mut self) {
        if self.themes.reload() {
            tracing::info!("Reloading themes");
            self.spawn_fetch(|backend| AsyncMessage::ThemesLoaded(backend.list_themes()));
        }
    }

    /// Open the detail view for the selected card.
    pub fn open_selected(&mut self) {
        if let Some(theme) = self.themes.selected().cloned() {
            self.open_theme(theme);
        }
    }

    /// Open the detail view for the theme called `name`, if listed.
    pub fn open_theme_by_name(&mut self, name: &str) -> bool {
        match self.themes.find(name).cloned() {
            Some(theme) => {
                self.open_theme(theme);
                true
            }
            None => false,
        }
    }

    pub fn open_theme(&mut self, theme: Arc<ThemeSummary>) {
        tracing::info!("Opening theme {}", theme.name);
        if self.catalog.begin_fetch() {
            self.spawn_fetch(|backend| AsyncMessage::TemplatesLoaded(backend.list_templates()));
        }
        if let Some(ticket) = self.detail.open(theme) {
            self.detail_scroll = 0;
            self.spawn_render(ticket);
        }
    }

    pub fn close_detail(&mut self) {
        if self.detail.is_open() {
            tracing::info!("Closing detail view");
            self.detail.close();
            self.template_picker = None;
            self.detail_scroll = 0;
        }
    }

    /// Switch the detail view to `template`, fetching a new rendering if the
    /// selection changed.
    pub fn select_template(&mut self, template: TemplateId) {
        tracing::info!("Selecting template {}", template);
        if let Some(ticket) = self.detail.select_template(template) {
            self.spawn_render(ticket);
        }
    }

    /// Copy exactly the displayed text. Does nothing while nothing is shown.
    pub fn copy_rendered(&mut self) {
        let Some(text) = self.detail.displayed_text() else {
            tracing::debug!("Copy requested with nothing rendered");
            return;
        };
        self.clipboard.copy(text);
        self.notify(Notification::success("Copied to clipboard"));
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    /// Push to the notification channel.
    pub fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::warn!("{}", notification.message),
            Severity::Success => tracing::info!("{}", notification.message),
        }
        self.notifications.push(notification, self.time_source.now());
    }

    /// Expire the notification if its time is up. Returns true if the
    /// screen changed.
    pub fn tick(&mut self) -> bool {
        self.notifications.tick(self.time_source.now())
    }

    /// Open the template dropdown with the current template highlighted.
    pub fn open_template_picker(&mut self) {
        if !self.detail.is_open() {
            return;
        }
        let current = self.detail.template().clone();
        let mut options: Vec<String> = self
            .catalog
            .templates()
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();
        if !self.catalog.templates().contains(&current) {
            options.insert(0, current.as_str().to_string());
        }
        let mut picker = DropdownState::new(options, "Template")
            .with_selected_value(current.as_str())
            .with_focus(FocusState::Focused);
        picker.toggle_open();
        self.template_picker = Some(picker);
    }

    fn spawn_render(&mut self, ticket: RenderTicket) {
        tracing::debug!(
            "Render fetch #{} for {} / {}",
            ticket.seq,
            ticket.key.theme,
            ticket.key.template
        );
        self.spawn_fetch(move |backend| {
            let result = backend.render_theme(&ticket.key.theme, &ticket.key.template);
            AsyncMessage::ThemeRendered { ticket, result }
        });
    }

    /// Run `fetch` on the blocking pool and deliver its message through
    /// the bridge.
    fn spawn_fetch<F>(&mut self, fetch: F)
    where
        F: FnOnce(&dyn Backend) -> AsyncMessage + Send + 'static,
    {
        let Some(runtime) = &self.runtime else {
            return;
        };
        let backend = Arc::clone(&self.backend);
        let sender = self.bridge.sender();
        self.in_flight += 1;
        runtime.spawn_blocking(move || {
            let _ = sender.send(fetch(backend.as_ref()));
        });
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 {
            return;
        }
        let body = Rect::new(area.x, area.y, area.width, area.height - 1);
        let status = Rect::new(area.x, area.bottom() - 1, area.width, 1);

        self.gallery_layout = gallery::render_gallery(frame, body, &self.themes);

        if self.detail.is_open() {
            detail::render_detail(
                frame,
                body,
                &self.detail,
                self.template_picker.as_mut(),
                self.detail_scroll,
            );
        }

        notification::render_status_line(frame, status, self.notifications.current());
        convert_buffer_colors(frame.buffer_mut(), self.color_capability);
    }

    pub fn themes(&self) -> &ThemeList {
        &self.themes
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn detail(&self) -> &ThemeDetail {
        &self.detail
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn template_picker(&self) -> Option<&DropdownState> {
        self.template_picker.as_ref()
    }

    pub fn gallery_layout(&self) -> &GalleryLayout {
        &self.gallery_layout
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    /// Whether any request is still waiting to be processed.
    pub fn has_in_flight_requests(&self) -> bool {
        self.in_flight > 0
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Don't wait on requests nobody will read
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
