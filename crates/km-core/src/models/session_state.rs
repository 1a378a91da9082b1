use crate::MenuId;

/// Ephemeral per-conversation navigation state.
///
/// Holds only the logical parent of the currently displayed menu, so the
/// generic Back trigger is one level deep. This depth-1 history is a
/// deliberate design limit, not an undo stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub previous_menu: Option<MenuId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
