//! Ratatui views of the gallery state

pub mod card;
pub mod color;
pub mod controls;
pub mod detail;
pub mod gallery;
pub mod notification;
