use crate::{
    CoreError, ForwardAction, MenuGraph, MenuId, MenuLayout, TriggerOutcome, TriggerState,
};

use std::collections::BTreeSet;

use googletest::prelude::*;

fn home() -> MenuId {
    MenuId::new("HOME")
}

fn configured(keys: &[&str]) -> BTreeSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn home_layout() -> MenuLayout {
    MenuLayout::new("home heading", vec![vec!["A".to_string(), "B".to_string()]])
}

#[test]
fn given_submenu_trigger_when_built_then_lookup_is_enabled() {
    // Given
    let graph = MenuGraph::builder(home())
        .layout(home(), home_layout())
        .layout(
            MenuId::new("A_MENU"),
            MenuLayout::new("a heading", vec![]).with_back_target(home()),
        )
        .submenu("A", MenuId::new("A_MENU"))
        .build(&configured(&[]))
        .unwrap();

    // When
    let entry = graph.trigger("A");

    // Then
    assert_that!(entry, some(anything()));
    let entry = entry.unwrap();
    assert_that!(entry.state, eq(TriggerState::Enabled));
    assert_that!(
        entry.outcome,
        eq(TriggerOutcome::Submenu {
            target: MenuId::new("A_MENU")
        })
    );
}

#[test]
fn given_duplicate_trigger_when_built_then_rejected() {
    // Given: the same label registered twice
    let result = MenuGraph::builder(home())
        .layout(home(), home_layout())
        .trigger(
            "A",
            TriggerOutcome::Forward {
                actions: vec![ForwardAction::new("MAIN", 1)],
            },
        )
        .trigger(
            "A",
            TriggerOutcome::Forward {
                actions: vec![ForwardAction::new("MAIN", 2)],
            },
        )
        .build(&configured(&["MAIN"]));

    // Then
    assert_that!(
        matches!(result, Err(CoreError::DuplicateTrigger { .. })),
        eq(true)
    );
}

#[test]
fn given_submenu_target_without_layout_when_built_then_rejected() {
    let result = MenuGraph::builder(home())
        .layout(home(), home_layout())
        .submenu("A", MenuId::new("NOWHERE"))
        .build(&configured(&[]));

    assert_that!(
        matches!(result, Err(CoreError::UnknownMenuTarget { .. })),
        eq(true)
    );
}

#[test]
fn given_missing_home_layout_when_built_then_rejected() {
    let result = MenuGraph::builder(home()).build(&configured(&[]));

    assert_that!(
        matches!(result, Err(CoreError::MissingHomeLayout { .. })),
        eq(true)
    );
}

#[test]
fn given_unknown_back_target_when_built_then_rejected() {
    let result = MenuGraph::builder(home())
        .layout(home(), home_layout())
        .layout(
            MenuId::new("A_MENU"),
            MenuLayout::new("a", vec![]).with_back_target(MenuId::new("NOWHERE")),
        )
        .build(&configured(&[]));

    assert_that!(
        matches!(result, Err(CoreError::UnknownBackTarget { .. })),
        eq(true)
    );
}

#[test]
fn given_forward_with_unconfigured_key_when_built_then_trigger_kept_but_unconfigured() {
    // Given: a multi-forward where one of two keys has no configured source
    let graph = MenuGraph::builder(home())
        .layout(home(), home_layout())
        .trigger(
            "Books",
            TriggerOutcome::Forward {
                actions: vec![
                    ForwardAction::new("MAIN", 10),
                    ForwardAction::new("BOOKS", 11),
                ],
            },
        )
        .build(&configured(&["MAIN"]))
        .unwrap();

    // Then: the entry stays enumerable but is not enabled
    let entry = graph.trigger("Books").unwrap();
    assert_that!(entry.state, eq(TriggerState::Unconfigured));
    assert_that!(entry.is_enabled(), eq(false));
    assert_that!(graph.unconfigured_triggers(), eq(vec!["Books"]));
}

#[test]
fn given_fully_configured_forward_when_built_then_enabled() {
    let graph = MenuGraph::builder(home())
        .layout(home(), home_layout())
        .trigger(
            "Books",
            TriggerOutcome::Forward {
                actions: vec![
                    ForwardAction::new("MAIN", 10),
                    ForwardAction::new("BOOKS", 11),
                ],
            },
        )
        .build(&configured(&["MAIN", "BOOKS"]))
        .unwrap();

    assert_that!(graph.trigger("Books").unwrap().is_enabled(), eq(true));
    assert_that!(graph.unconfigured_triggers().is_empty(), eq(true));
}

#[test]
fn given_label_with_different_case_when_looked_up_then_not_found() {
    // Label matching is exact-string and case-sensitive
    let graph = MenuGraph::builder(home())
        .layout(home(), home_layout())
        .layout(
            MenuId::new("A_MENU"),
            MenuLayout::new("a", vec![]).with_back_target(home()),
        )
        .submenu("🏛️ About AAU", MenuId::new("A_MENU"))
        .build(&configured(&[]))
        .unwrap();

    assert_that!(graph.trigger("🏛️ about aau"), none());
    assert_that!(graph.trigger("About AAU"), none());
    assert_that!(graph.trigger("🏛️ About AAU"), some(anything()));
}
