//! Core types and state machines for the theme-repo gallery.
//!
//! Nothing in this crate touches the network, the terminal or the clock.
//! Fetches are described as requests that the caller executes, and their
//! results are fed back in through `resolve` methods. Time is passed in as
//! an [`std::time::Instant`].

pub mod catalog;
pub mod detail;
pub mod error;
pub mod gallery;
pub mod notification;
pub mod render;
pub mod request;
pub mod template;
pub mod theme;

pub use error::FetchError;
pub use notification::{Notification, NotificationChannel, Severity};
pub use template::TemplateId;
pub use theme::ThemeSummary;
