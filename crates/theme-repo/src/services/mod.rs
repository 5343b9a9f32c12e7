pub mod async_bridge;
pub mod backend;
pub mod clipboard;
pub mod log_dirs;
pub mod terminal_modes;
pub mod time_source;
pub mod tracing_setup;
