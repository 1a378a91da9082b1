pub mod error;
pub mod forwarder;
pub mod ledger;
pub mod menu;
pub mod navigation;
pub mod transport;

pub use error::{EngineError, Result};
pub use forwarder::ContentForwarder;
pub use ledger::{LedgerSettings, ReferralLedger, ReferralStats};
pub use menu::catalog::{self, build_menu_graph};
pub use navigation::{NavigationEngine, Resolution};
pub use transport::{
    ButtonAction, ChatTransport, InlineButton, MessageRef, ReplyMarkup, TransportError,
};

#[cfg(test)]
mod tests;
