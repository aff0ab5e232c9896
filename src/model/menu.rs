//! Menu model: open and rollover state.

/// Open state of a menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuModel {
    open: bool,
    rollover_open: bool,
}

impl MenuModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the menu opens when the pointer rolls over it (builder).
    pub fn with_rollover_open(mut self, rollover_open: bool) -> Self {
        self.rollover_open = rollover_open;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_rollover_open(&self) -> bool {
        self.rollover_open
    }

    /// Returns the previous state.
    pub fn set_open(&mut self, open: bool) -> bool {
        std::mem::replace(&mut self.open, open)
    }

    /// Returns the previous state.
    pub fn set_rollover_open(&mut self, rollover_open: bool) -> bool {
        std::mem::replace(&mut self.rollover_open, rollover_open)
    }
}
