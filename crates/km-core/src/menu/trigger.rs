use crate::{ForwardAction, MenuId};

/// What a trigger label does when received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Enter the target menu and record the leaving menu for Back
    Submenu { target: MenuId },
    /// Re-send the stored content items, in order
    Forward { actions: Vec<ForwardAction> },
}

/// Availability of a trigger, fixed at graph build time.
///
/// Triggers whose forward sources are absent from configuration stay in the
/// graph as `Unconfigured` so the full trigger set remains enumerable; they
/// resolve to nothing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Enabled,
    Disabled,
    Unconfigured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEntry {
    pub state: TriggerState,
    pub outcome: TriggerOutcome,
}

impl TriggerEntry {
    pub fn is_enabled(&self) -> bool {
        self.state == TriggerState::Enabled
    }
}
