//! Drives an [`App`] against a ratatui `TestBackend`.

use anyhow::bail;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::{Buffer, Cell};
use ratatui::Terminal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use theme_repo::config::Config;
use theme_repo::services::backend::Backend;
use theme_repo::services::clipboard::Clipboard;
use theme_repo::services::time_source::{SharedTimeSource, TestTimeSource};
use theme_repo::App;

/// How long `wait_until` polls before giving up
const WAIT_DEADLINE: Duration = Duration::from_secs(5);

pub struct GalleryTestHarness {
    app: App,
    terminal: Terminal<TestBackend>,
    time_source: Arc<TestTimeSource>,
}

impl GalleryTestHarness {
    /// A harness with default configuration. The app is not started yet.
    pub fn new(width: u16, height: u16, backend: Arc<dyn Backend>) -> anyhow::Result<Self> {
        Self::with_config(width, height, Config::default(), backend)
    }

    pub fn with_config(
        width: u16,
        height: u16,
        config: Config,
        backend: Arc<dyn Backend>,
    ) -> anyhow::Result<Self> {
        super::tracing::init_tracing_from_env();

        let time_source = TestTimeSource::shared();
        let shared: SharedTimeSource = time_source.clone();
        let mut app = App::new(&config, backend, shared)?;
        app.set_clipboard(Clipboard::internal_only());
        let terminal = Terminal::new(TestBackend::new(width, height))?;

        Ok(Self {
            app,
            terminal,
            time_source,
        })
    }

    /// Start the app and wait for the theme list to settle.
    pub fn start(&mut self) -> anyhow::Result<()> {
        self.app.start();
        self.wait_until_idle()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn time_source(&self) -> &Arc<TestTimeSource> {
        &self.time_source
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        let app = &mut self.app;
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }

    /// Apply finished requests, then render.
    pub fn process_async_and_render(&mut self) -> anyhow::Result<bool> {
        let changed = self.app.process_async_messages();
        self.render()?;
        Ok(changed)
    }

    /// Poll until `condition` holds, failing after a deadline.
    pub fn wait_until<F>(&mut self, condition: F) -> anyhow::Result<()>
    where
        F: Fn(&Self) -> bool,
    {
        let start = Instant::now();
        loop {
            self.process_async_and_render()?;
            if condition(self) {
                return Ok(());
            }
            if start.elapsed() > WAIT_DEADLINE {
                bail!(
                    "condition not met within {:?}. Screen:\n{}",
                    WAIT_DEADLINE,
                    self.screen_to_string()
                );
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    /// Wait until every issued request has been processed.
    pub fn wait_until_idle(&mut self) -> anyhow::Result<()> {
        self.wait_until(|h| !h.app.has_in_flight_requests())
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> anyhow::Result<()> {
        self.app.handle_key(KeyEvent::new(code, modifiers));
        self.render()
    }

    pub fn press(&mut self, code: KeyCode) -> anyhow::Result<()> {
        self.send_key(code, KeyModifiers::NONE)
    }

    pub fn type_char(&mut self, c: char) -> anyhow::Result<()> {
        self.press(KeyCode::Char(c))
    }

    /// Move the test clock forward and let timers fire.
    pub fn advance_time(&mut self, duration: Duration) -> anyhow::Result<()> {
        self.time_source.advance(duration);
        self.app.tick();
        self.render()
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.buffer().cell((x, y))
    }

    /// The screen as text, one line per row.
    pub fn screen_to_string(&self) -> String {
        let buffer = self.buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    /// Position of the first occurrence of `text` on screen.
    pub fn find_text(&self, text: &str) -> Option<(u16, u16)> {
        self.screen_to_string()
            .lines()
            .enumerate()
            .find_map(|(row, line)| {
                line.find(text).map(|byte_index| {
                    let col = line[..byte_index].chars().count();
                    (col as u16, row as u16)
                })
            })
    }

    pub fn status_line(&self) -> String {
        self.screen_to_string()
            .lines()
            .last()
            .unwrap_or_default()
            .to_string()
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen not to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }
}
