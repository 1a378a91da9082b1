use crate::{ChatMemberStatus, ForwardAction, MenuGraph, MenuId, MenuLayout, TriggerOutcome};

use std::collections::BTreeSet;
use std::str::FromStr;

use proptest::prelude::*;

fn small_graph() -> MenuGraph {
    let home = MenuId::new("HOME");
    MenuGraph::builder(home.clone())
        .layout(
            home.clone(),
            MenuLayout::new("home", vec![vec!["📚 UAT Preparation".to_string()]]),
        )
        .layout(
            MenuId::new("UAT_PREPARATION"),
            MenuLayout::new("uat", vec![]).with_back_target(home),
        )
        .submenu("📚 UAT Preparation", MenuId::new("UAT_PREPARATION"))
        .trigger(
            "🌐 Websites",
            TriggerOutcome::Forward {
                actions: vec![ForwardAction::new("MAIN", 104)],
            },
        )
        .build(&["MAIN".to_string()].into_iter().collect::<BTreeSet<_>>())
        .unwrap()
}

proptest! {
    #[test]
    fn given_arbitrary_unregistered_label_when_looked_up_then_none(label in "[a-zA-Z0-9 ]{1,40}") {
        let graph = small_graph();
        prop_assert!(graph.trigger(&label).is_none());
    }

    #[test]
    fn given_arbitrary_status_string_when_parsed_then_never_fails(s in "[a-z_]{0,20}") {
        prop_assert!(ChatMemberStatus::from_str(&s).is_ok());
    }

    #[test]
    fn given_registered_labels_when_looked_up_then_always_found(_x in 0u8..5) {
        let graph = small_graph();
        prop_assert!(graph.trigger("📚 UAT Preparation").is_some());
        prop_assert!(graph.trigger("🌐 Websites").is_some());
    }
}
