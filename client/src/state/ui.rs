//! Local UI chrome state (theme, pro modal, mobile sidebar).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state so the navbar,
//! sidebar and modal can coordinate without knowing about each other.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state shared by the layout components.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub dark_mode: bool,
    /// Whether the "Upgrade to Pro" modal is open.
    pub pro_modal_open: bool,
    /// Whether the slide-over sidebar is open on narrow screens.
    pub mobile_sidebar_open: bool,
}

impl UiState {
    pub fn open_pro_modal(&mut self) {
        self.pro_modal_open = true;
        self.mobile_sidebar_open = false;
    }

    pub fn close_pro_modal(&mut self) {
        self.pro_modal_open = false;
    }
}
