// Library interface for the theme-repo gallery client

pub mod app;
pub mod config;
pub mod services;
pub mod view;

pub use app::App;
pub use config::Config;
