pub mod error;
pub mod menu;
pub mod models;

pub use error::{CoreError, Result};
pub use menu::forward_action::ForwardAction;
pub use menu::menu_graph::{MenuGraph, MenuGraphBuilder};
pub use menu::menu_id::MenuId;
pub use menu::menu_layout::MenuLayout;
pub use menu::trigger::{TriggerEntry, TriggerOutcome, TriggerState};
pub use models::chat_member_status::ChatMemberStatus;
pub use models::chat_user::ChatUser;
pub use models::invited_entry::InvitedEntry;
pub use models::session_state::SessionState;
pub use models::user_record::UserRecord;

#[cfg(test)]
mod tests;
