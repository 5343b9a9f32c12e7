//! Reusable UI controls

pub mod dropdown;

/// Focus state of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Focused,
}
