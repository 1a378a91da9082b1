//! The built-in menu catalog: every menu layout, submenu trigger, and
//! content-forward mapping the bot serves.
//!
//! This is data, not behavior. The graph is built and validated once at
//! startup against the configured forwarding sources; triggers whose
//! sources are absent stay in the graph as unconfigured and resolve to
//! nothing.

use km_core::{
    ForwardAction, MenuGraph, MenuId, MenuLayout, Result as CoreErrorResult, TriggerOutcome,
};

use std::collections::BTreeSet;

use log::warn;

/// Labels handled outside the graph by the session gateway.
pub const BACK_LABEL: &str = "⬅ Back";
pub const HOME_LABEL: &str = "🏠Home";
pub const REFERRAL_LABEL: &str = "💰 Referral";

pub mod menu_ids {
    pub const HOME: &str = "HOME";
    pub const UAT_PREPARATION: &str = "UAT_PREPARATION";
    pub const RESOURCES: &str = "RESOURCES";
    pub const ABOUT_AAU: &str = "ABOUT_AAU";
    pub const ABOUT_ASTU: &str = "ABOUT_ASTU";
    pub const ABOUT_AASTU: &str = "ABOUT_AASTU";
    pub const ABOUT_SPHMMC: &str = "ABOUT_SPHMMC";
    pub const OTHER_UNIVERSITIES: &str = "OTHER_UNIVERSITIES";
    pub const WHAT_IS_UAT: &str = "WHAT_IS_UAT";
    pub const UAT_AAU: &str = "UAT_AAU";
    pub const UAT_ASTU: &str = "UAT_ASTU";
    pub const UAT_AASTU: &str = "UAT_AASTU";
    pub const AASTU_ASTU_UAT: &str = "AASTU_ASTU_UAT";
    pub const SPHMMC_ENTRANCE: &str = "SPHMMC_ENTRANCE";
}

/// Menu-entering triggers: label to target menu.
const SUBMENU_TRIGGERS: &[(&str, &str)] = &[
    ("📚 UAT Preparation", menu_ids::UAT_PREPARATION),
    (HOME_LABEL, menu_ids::HOME),
    ("🗂️ Resources", menu_ids::RESOURCES),
    ("🏛️ About AAU", menu_ids::ABOUT_AAU),
    ("🏫 About ASTU", menu_ids::ABOUT_ASTU),
    ("🏫 About AASTU", menu_ids::ABOUT_AASTU),
    ("🏥 About SPHMMC", menu_ids::ABOUT_SPHMMC),
    ("🎓 Other Universities", menu_ids::OTHER_UNIVERSITIES),
    ("❓ What is UAT?", menu_ids::WHAT_IS_UAT),
    ("🏛 AAU UAT", menu_ids::UAT_AAU),
    ("🏛 ASTU UAT", menu_ids::UAT_ASTU),
    ("🏛 AASTU UAT", menu_ids::UAT_AASTU),
    ("🏫 AASTU & ASTU UAT", menu_ids::AASTU_ASTU_UAT),
    ("🏥 SPHMMC Entrance", menu_ids::SPHMMC_ENTRANCE),
];

/// Single-item forwards: label to (channel key, stored message id).
const FORWARD_TRIGGERS: &[(&str, &str, i64)] = &[
    ("🎯 Kimem Short Notes", "MAIN", 7),
    ("🌐 Websites", "MAIN", 104),
    ("📖 UAT Overview", "MAIN", 201),
    ("❓ Frequently Asked", "MAIN", 202),
    ("ℹ️ About Kimem UAT", "MAIN", 6),
    ("🏫 AAU Overview", "MAIN", 301),
    ("🏢 AAU Departments", "MAIN", 302),
    ("📍 AAU Campuses", "MAIN", 303),
    ("🎒 Life In AAU", "MAIN", 304),
    ("🎓 AAU After Graduation", "MAIN", 305),
    ("🌐AAU Websites", "MAIN", 306),
    ("🏫 ASTU Overview", "MAIN", 311),
    ("🏢 ASTU Departments", "MAIN", 312),
    ("📍 ASTU Campuses", "MAIN", 313),
    ("🎒 Life In ASTU", "MAIN", 314),
    ("🎓 ASTU After Graduation", "MAIN", 315),
    ("🌐ASTU Websites", "MAIN", 316),
    ("🏫 AASTU Overview", "MAIN", 321),
    ("🏢 AASTU Departments", "MAIN", 322),
    ("📍 AASTU Campuses", "MAIN", 323),
    ("🎒 Life In AASTU", "MAIN", 324),
    ("🎓 AASTU After Graduation", "MAIN", 325),
    ("🌐AASTU Websites", "MAIN", 326),
    ("🏥 SPHMMC Overview", "MAIN", 331),
    ("🏢 SPHMMC Departments", "MAIN", 332),
    ("📍 SPHMMC Campuses", "MAIN", 333),
    ("🎒 Life In SPHMMC", "MAIN", 334),
    ("🎓 SPHMMC After Graduation", "MAIN", 335),
    ("🌐SPHMMC Websites", "MAIN", 336),
    ("🏫 Bahiradar University", "OTHERS", 401),
    ("🏫 Haramaya University", "OTHERS", 402),
    ("🏫 Jimma University", "OTHERS", 403),
    ("📘 AAU Last Year UAT", "MAIN", 501),
    ("📖 AAU Model UAT", "MAIN", 502),
    ("📚 AAU UAT Overview", "MAIN", 503),
    ("❓ AAU UAT FAQ", "MAIN", 504),
    ("📝 How to Prepare For AAU", "MAIN", 505),
    ("📘 ASTU Last Year UAT", "MAIN", 511),
    ("📖 ASTU Model UAT", "MAIN", 512),
    ("📚 ASTU UAT Overview", "MAIN", 513),
    ("❓ ASTU UAT FAQ", "MAIN", 514),
    ("📝 How to Prepare For ASTU", "MAIN", 515),
    ("📘 AASTU Last Year UAT", "MAIN", 521),
    ("📖 AASTU Model UAT", "MAIN", 522),
    ("📚 AASTU UAT Overview", "MAIN", 523),
    ("❓ AASTU UAT FAQ", "MAIN", 524),
    ("📝 How to Prepare For AASTU", "MAIN", 525),
    ("📘 SPHMMC Last Year Exam", "MAIN", 531),
    ("📖 SPHMMC Model Exam", "MAIN", 532),
    ("📚 SPHMMC Exam Overview", "MAIN", 533),
    ("❓ SPHMMC Exam FAQ", "MAIN", 534),
    ("📝 How to Prepare For SPHMMC", "MAIN", 535),
];

/// Multi-item forwards, delivered in order.
const MULTI_FORWARD_TRIGGERS: &[(&str, &[(&str, i64)])] = &[(
    "📘 Text Books",
    &[("MAIN", 10), ("MAIN", 13), ("BOOKS", 11)],
)];

/// Build and validate the full graph against the configured forwarding
/// sources, logging every trigger left unconfigured.
pub fn build_menu_graph(configured_keys: &BTreeSet<String>) -> CoreErrorResult<MenuGraph> {
    let graph = catalog_builder().build(configured_keys)?;

    for label in graph.unconfigured_triggers() {
        warn!("Forward source missing - trigger disabled: {}", label);
    }

    Ok(graph)
}

fn catalog_builder() -> km_core::MenuGraphBuilder {
    let home = MenuId::new(menu_ids::HOME);
    let uat = MenuId::new(menu_ids::UAT_PREPARATION);

    let mut builder = MenuGraph::builder(home.clone())
        .layout(home.clone(), home_layout())
        .layout(uat.clone(), uat_preparation_layout(home.clone()))
        .layout(MenuId::new(menu_ids::RESOURCES), resources_layout(home.clone()))
        .layout(
            MenuId::new(menu_ids::OTHER_UNIVERSITIES),
            other_universities_layout(home.clone()),
        )
        .layout(MenuId::new(menu_ids::WHAT_IS_UAT), what_is_uat_layout(uat.clone()))
        .layout(
            MenuId::new(menu_ids::AASTU_ASTU_UAT),
            aastu_astu_uat_layout(uat.clone()),
        )
        .layout(
            MenuId::new(menu_ids::SPHMMC_ENTRANCE),
            sphmmc_entrance_layout(uat.clone()),
        );

    for (menu, university) in [
        (menu_ids::ABOUT_AAU, "AAU"),
        (menu_ids::ABOUT_ASTU, "ASTU"),
        (menu_ids::ABOUT_AASTU, "AASTU"),
        (menu_ids::ABOUT_SPHMMC, "SPHMMC"),
    ] {
        builder = builder.layout(MenuId::new(menu), about_layout(university, home.clone()));
    }

    for (menu, university) in [
        (menu_ids::UAT_AAU, "AAU"),
        (menu_ids::UAT_ASTU, "ASTU"),
        (menu_ids::UAT_AASTU, "AASTU"),
    ] {
        builder = builder.layout(MenuId::new(menu), uat_university_layout(university, uat.clone()));
    }

    for (label, target) in SUBMENU_TRIGGERS {
        builder = builder.submenu(*label, MenuId::new(*target));
    }

    for (label, channel_key, message_id) in FORWARD_TRIGGERS {
        builder = builder.trigger(
            *label,
            TriggerOutcome::Forward {
                actions: vec![ForwardAction::new(*channel_key, *message_id)],
            },
        );
    }

    for (label, entries) in MULTI_FORWARD_TRIGGERS {
        builder = builder.trigger(
            *label,
            TriggerOutcome::Forward {
                actions: entries
                    .iter()
                    .map(|(key, message_id)| ForwardAction::new(*key, *message_id))
                    .collect(),
            },
        );
    }

    builder
}

fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|label| label.to_string()).collect())
        .collect()
}

fn home_layout() -> MenuLayout {
    MenuLayout::new(
        "🏠 You are back home. Use the options below:",
        rows(&[
            &[REFERRAL_LABEL, "📚 UAT Preparation"],
            &["🗂️ Resources", "🏛️ About AAU"],
            &["🏫 About ASTU", "🏫 About AASTU", "🏥 About SPHMMC"],
            &["🎓 Other Universities", "ℹ️ About Kimem UAT"],
        ]),
    )
}

fn uat_preparation_layout(home: MenuId) -> MenuLayout {
    MenuLayout::new(
        "📘 UAT Preparation Section\nChoose the university or topic you want to explore:",
        rows(&[
            &["❓ What is UAT?", "🏛 AAU UAT"],
            &["🏫 AASTU & ASTU UAT", "🏥 SPHMMC Entrance"],
            &[BACK_LABEL, HOME_LABEL],
        ]),
    )
    .with_back_target(home)
}

fn resources_layout(home: MenuId) -> MenuLayout {
    MenuLayout::new(
        "🗂️ Resources Section:\nSelect a category to explore useful learning materials.",
        rows(&[
            &["🎯 Kimem Short Notes", "📘 Text Books"],
            &["📚 SAT Collection", "🌐 Websites"],
            &[BACK_LABEL, HOME_LABEL],
        ]),
    )
    .with_back_target(home)
}

fn about_layout(university: &str, home: MenuId) -> MenuLayout {
    MenuLayout::new(
        format!("🏛️ About {} Section:\nSelect an option to learn more.", university),
        vec![
            vec![
                format!("🏫 {} Overview", university),
                format!("🏢 {} Departments", university),
            ],
            vec![
                format!("📍 {} Campuses", university),
                format!("🎒 Life In {}", university),
            ],
            vec![
                format!("🎓 {} After Graduation", university),
                format!("🌐{} Websites", university),
            ],
            vec![BACK_LABEL.to_string(), HOME_LABEL.to_string()],
        ],
    )
    .with_back_target(home)
}

fn other_universities_layout(home: MenuId) -> MenuLayout {
    MenuLayout::new(
        "🎓 Other Universities Section:\nSelect a university to learn more.",
        rows(&[
            &["🏫 Bahiradar University"],
            &["🏫 Haramaya University"],
            &["🏫 Jimma University"],
            &[BACK_LABEL, HOME_LABEL],
        ]),
    )
    .with_back_target(home)
}

fn what_is_uat_layout(uat: MenuId) -> MenuLayout {
    MenuLayout::new(
        "Choose an option to learn about UAT:",
        rows(&[
            &["📖 UAT Overview"],
            &["❓ Frequently Asked"],
            &[BACK_LABEL, HOME_LABEL],
        ]),
    )
    .with_back_target(uat)
}

fn uat_university_layout(university: &str, uat: MenuId) -> MenuLayout {
    MenuLayout::new(
        format!("🏛 {} UAT Section:\nChoose an option to explore:", university),
        vec![
            vec![
                format!("📘 {} Last Year UAT", university),
                format!("📖 {} Model UAT", university),
            ],
            vec![
                format!("📚 {} UAT Overview", university),
                format!("❓ {} UAT FAQ", university),
            ],
            vec![format!("📝 How to Prepare For {}", university)],
            vec![BACK_LABEL.to_string(), HOME_LABEL.to_string()],
        ],
    )
    .with_back_target(uat)
}

fn aastu_astu_uat_layout(uat: MenuId) -> MenuLayout {
    MenuLayout::new(
        "🏫 AASTU & ASTU UAT Section:\nChoose an option to explore:",
        rows(&[
            &["📘 AASTU & ASTU Last Year UAT", "📖 AASTU & ASTU Model UAT"],
            &["📚 AASTU & ASTU UAT Overview", "❓ AASTU & ASTU UAT FAQ"],
            &["📝 How to Prepare For AASTU & ASTU"],
            &[BACK_LABEL, HOME_LABEL],
        ]),
    )
    .with_back_target(uat)
}

fn sphmmc_entrance_layout(uat: MenuId) -> MenuLayout {
    MenuLayout::new(
        "🏥 SPHMMC Entrance Section:\nChoose an option to explore:",
        rows(&[
            &["📘 SPHMMC Last Year Exam", "📖 SPHMMC Model Exam"],
            &["📚 SPHMMC Exam Overview", "❓ SPHMMC Exam FAQ"],
            &["📝 How to Prepare For SPHMMC"],
            &[BACK_LABEL, HOME_LABEL],
        ]),
    )
    .with_back_target(uat)
}
