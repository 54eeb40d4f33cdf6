//! ImGui overlay: the control panel and hover tooltip.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{control_panel, hover_tooltip, ControlState, Theme};
