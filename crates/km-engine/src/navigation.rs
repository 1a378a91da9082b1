//! Label resolution over the menu graph plus per-session history.
//!
//! The session remembers one menu: the logical parent of whatever is on
//! screen. Back is one level, always. Entering a menu by any path, Back
//! included, records that menu's own parent, so consecutive Backs walk
//! single steps rather than unwinding a stack.

use crate::menu::catalog::BACK_LABEL;

use km_core::{ForwardAction, MenuGraph, MenuId, SessionState, TriggerOutcome};

use std::sync::Arc;

/// What one inbound label amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Render this menu and replace the session state with `session`
    Render { menu: MenuId, session: SessionState },
    /// Run these forward actions in order; session state is untouched
    Forward { actions: Vec<ForwardAction> },
    /// Unrecognized or unconfigured label; nothing happens
    Ignored,
}

pub struct NavigationEngine {
    graph: Arc<MenuGraph>,
}

impl NavigationEngine {
    pub fn new(graph: Arc<MenuGraph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &MenuGraph {
        &self.graph
    }

    /// Resolve one label against the graph and the session's history.
    ///
    /// Matching is exact-string and case-sensitive. Labels that are neither
    /// the back trigger nor registered in the graph are inert.
    pub fn resolve(&self, label: &str, session: &SessionState) -> Resolution {
        if label == BACK_LABEL {
            let target = session
                .previous_menu
                .as_ref()
                .filter(|menu| self.graph.contains_menu(menu))
                .cloned()
                .unwrap_or_else(|| self.graph.home().clone());
            return self.render(target);
        }

        match self.graph.trigger(label) {
            Some(entry) if entry.is_enabled() => match &entry.outcome {
                TriggerOutcome::Submenu { target } => self.render(target.clone()),
                TriggerOutcome::Forward { actions } => Resolution::Forward {
                    actions: actions.clone(),
                },
            },
            // Unconfigured triggers were never wired; unknown labels are inert
            _ => Resolution::Ignored,
        }
    }

    /// Render outcome for the home menu, used when gating completes.
    pub fn render_home(&self) -> Resolution {
        self.render(self.graph.home().clone())
    }

    fn render(&self, menu: MenuId) -> Resolution {
        let previous_menu = self
            .graph
            .layout(&menu)
            .and_then(|layout| layout.back_target.clone());

        Resolution::Render {
            menu,
            session: SessionState { previous_menu },
        }
    }
}
