//! Static menu graph: trigger labels mapped to submenu transitions or
//! forward actions, plus the layout of every menu.
//!
//! Built once at startup through [`MenuGraphBuilder`] and treated as
//! immutable for the process lifetime. Label matching is exact-string and
//! case-sensitive, leading symbol glyphs included.

use crate::{CoreError, MenuId, MenuLayout, Result as CoreErrorResult, TriggerEntry};
use crate::{TriggerOutcome, TriggerState};

use std::collections::{BTreeSet, HashMap};
use std::panic::Location;

use error_location::ErrorLocation;

#[derive(Debug)]
pub struct MenuGraph {
    home: MenuId,
    triggers: HashMap<String, TriggerEntry>,
    layouts: HashMap<MenuId, MenuLayout>,
}

impl MenuGraph {
    pub fn builder(home: MenuId) -> MenuGraphBuilder {
        MenuGraphBuilder::new(home)
    }

    /// The menu rendered after gating passes, and the Back fallback.
    pub fn home(&self) -> &MenuId {
        &self.home
    }

    /// O(1) lookup from a trigger label to its entry.
    pub fn trigger(&self, label: &str) -> Option<&TriggerEntry> {
        self.triggers.get(label)
    }

    pub fn layout(&self, menu: &MenuId) -> Option<&MenuLayout> {
        self.layouts.get(menu)
    }

    pub fn contains_menu(&self, menu: &MenuId) -> bool {
        self.layouts.contains_key(menu)
    }

    /// Labels registered but left unconfigured at build time, sorted for
    /// stable operator logging.
    pub fn unconfigured_triggers(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .triggers
            .iter()
            .filter(|(_, entry)| entry.state == TriggerState::Unconfigured)
            .map(|(label, _)| label.as_str())
            .collect();
        labels.sort_unstable();
        labels
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }
}

/// Accumulates triggers and layouts, then validates the whole graph in
/// `build()`.
pub struct MenuGraphBuilder {
    home: MenuId,
    triggers: Vec<(String, TriggerOutcome)>,
    layouts: Vec<(MenuId, MenuLayout)>,
}

impl MenuGraphBuilder {
    pub fn new(home: MenuId) -> Self {
        Self {
            home,
            triggers: Vec::new(),
            layouts: Vec::new(),
        }
    }

    pub fn trigger(mut self, label: impl Into<String>, outcome: TriggerOutcome) -> Self {
        self.triggers.push((label.into(), outcome));
        self
    }

    pub fn submenu(self, label: impl Into<String>, target: MenuId) -> Self {
        self.trigger(label, TriggerOutcome::Submenu { target })
    }

    pub fn layout(mut self, menu: MenuId, layout: MenuLayout) -> Self {
        self.layouts.push((menu, layout));
        self
    }

    /// Validate and freeze the graph.
    ///
    /// Duplicate trigger labels and duplicate layouts are rejected rather
    /// than letting the last registration win. Every submenu target and
    /// every back target must have a layout. Forward entries whose channel
    /// keys are not all present in `configured_keys` are kept but marked
    /// `Unconfigured`.
    pub fn build(self, configured_keys: &BTreeSet<String>) -> CoreErrorResult<MenuGraph> {
        let mut layouts: HashMap<MenuId, MenuLayout> = HashMap::new();
        for (menu, layout) in self.layouts {
            if layouts.insert(menu.clone(), layout).is_some() {
                return Err(CoreError::DuplicateLayout {
                    menu: menu.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if !layouts.contains_key(&self.home) {
            return Err(CoreError::MissingHomeLayout {
                menu: self.home.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        for (menu, layout) in &layouts {
            if let Some(target) = &layout.back_target
                && !layouts.contains_key(target)
            {
                return Err(CoreError::UnknownBackTarget {
                    menu: menu.to_string(),
                    target: target.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        let mut triggers: HashMap<String, TriggerEntry> = HashMap::new();
        for (label, outcome) in self.triggers {
            let state = match &outcome {
                TriggerOutcome::Submenu { target } => {
                    if !layouts.contains_key(target) {
                        return Err(CoreError::UnknownMenuTarget {
                            label,
                            menu: target.to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    TriggerState::Enabled
                }
                TriggerOutcome::Forward { actions } => {
                    // One unresolved key degrades the whole entry: a partial
                    // multi-forward is worse than an absent feature.
                    if actions
                        .iter()
                        .all(|action| configured_keys.contains(&action.channel_key))
                    {
                        TriggerState::Enabled
                    } else {
                        TriggerState::Unconfigured
                    }
                }
            };

            let entry = TriggerEntry { state, outcome };
            if triggers.insert(label.clone(), entry).is_some() {
                return Err(CoreError::DuplicateTrigger {
                    label,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        Ok(MenuGraph {
            home: self.home,
            triggers,
            layouts,
        })
    }
}
