use crate::MenuId;

/// On-screen shape of one menu: the text above the keyboard and the button
/// labels in render order. Content only, no behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    pub heading: String,
    pub rows: Vec<Vec<String>>,
    /// Logical parent recorded as the session's Back target whenever this
    /// menu is rendered. `None` for the root menu.
    pub back_target: Option<MenuId>,
}

impl MenuLayout {
    pub fn new(heading: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            heading: heading.into(),
            rows,
            back_target: None,
        }
    }

    pub fn with_back_target(mut self, target: MenuId) -> Self {
        self.back_target = Some(target);
        self
    }

    /// All labels in this layout, in render order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}
