//! Local caching of remote site content.
//!
//! This module provides the `CacheManager` that decides, per content
//! type, whether to serve from local storage or fetch fresh, honoring
//! both a TTL and a remote "last updated" marker so admin edits
//! propagate before the TTL runs out.

pub mod manager;

pub use manager::{CacheManager, SECTION_TTL, TICKER_TTL};

/// Session-scoped UI flags, owned by the rendering layer and passed in
/// by reference instead of living in ambient globals.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    pub panel_open: bool,
    pub notices_loaded: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the notice panel; returns true when the caller should load
    /// notices (first open of the session).
    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        self.panel_open && !self.notices_loaded
    }

    pub fn mark_notices_loaded(&mut self) {
        self.notices_loaded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_panel_open_requests_a_load() {
        let mut state = SessionState::new();
        assert!(state.toggle_panel());
        state.mark_notices_loaded();

        assert!(!state.toggle_panel()); // closed
        assert!(!state.toggle_panel()); // reopened, already loaded
    }
}
