use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{poll as event_poll, read as event_read, Event as CrosstermEvent};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use theme_repo::config::{Config, ConfigOverrides};
use theme_repo::services::backend::HttpBackend;
use theme_repo::services::terminal_modes::{self, TerminalModes};
use theme_repo::services::time_source::RealTimeSource;
use theme_repo::services::{log_dirs, tracing_setup};
use theme_repo::view::color::ColorCapability;
use theme_repo::App;

/// Browse terminal color themes served by a theme-repo backend
#[derive(Parser, Debug)]
#[command(name = "theme-repo")]
#[command(about = "Terminal gallery for theme-repo color themes", long_about = None)]
#[command(version)]
struct Args {
    /// Base URL of the backend (overrides config file and environment)
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: per-process file in the state dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Seconds before a notification dismisses itself
    #[arg(long, value_name = "SECS")]
    notification_timeout: Option<u64>,

    /// Seconds before a backend request is abandoned
    #[arg(long, value_name = "SECS")]
    request_timeout: Option<u64>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            backend_url: self.backend_url.clone(),
            notification_timeout_secs: self.notification_timeout,
            request_timeout_secs: self.request_timeout,
        }
    }

    fn resolve_config(&self) -> AnyhowResult<Config> {
        Config::resolve_from_system(self.config.as_deref(), &self.overrides())
            .context("Failed to load configuration")
    }
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    // Handle --dump-config early (no terminal setup needed)
    if args.dump_config {
        let config = args.resolve_config()?;
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
        println!("{json}");
        return Ok(());
    }

    let log_file = args.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    if !tracing_setup::init_global(&log_file) {
        eprintln!("Warning: could not create log file {}", log_file.display());
    }
    log_dirs::cleanup_stale_logs();
    tracing::info!("theme-repo starting");

    let config = args.resolve_config()?;
    tracing::info!("Backend: {}", config.backend_url);

    let backend = HttpBackend::new(config.base_url()?, config.request_timeout());
    let mut app = App::new(&config, Arc::new(backend), RealTimeSource::shared())
        .context("Failed to create application")?;
    app.set_color_capability(ColorCapability::detect());

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let mut modes = TerminalModes::enable().context("Failed to set up terminal")?;
    let result = run(&mut app);
    modes.undo();

    tracing::info!("theme-repo exiting");
    result
}

fn run(app: &mut App) -> AnyhowResult<()> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = terminal.size()?;
    tracing::info!("Terminal size: {}x{}", size.width, size.height);

    app.start();
    run_event_loop(app, &mut terminal).context("Event loop returned an error")
}

fn run_event_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> AnyhowResult<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16);
    let mut last_render = Instant::now();
    let mut needs_render = true;

    loop {
        if app.process_async_messages() {
            needs_render = true;
        }
        if app.tick() {
            needs_render = true;
        }
        if app.should_quit() {
            break;
        }

        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| app.render(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let timeout = if needs_render {
            FRAME_DURATION.saturating_sub(last_render.elapsed())
        } else {
            Duration::from_millis(50)
        };
        if !event_poll(timeout)? {
            continue;
        }

        match event_read()? {
            CrosstermEvent::Key(key) => {
                if app.handle_key(key) {
                    needs_render = true;
                }
            }
            CrosstermEvent::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
                needs_render = true;
            }
            _ => {}
        }
    }

    Ok(())
}
