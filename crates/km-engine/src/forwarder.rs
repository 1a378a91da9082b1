//! Re-delivery of stored content into the requesting chat.

use crate::{ChatTransport, EngineError, Result as EngineResult};

use km_core::ForwardAction;

use std::collections::{BTreeMap, BTreeSet};
use std::panic::Location;

use error_location::ErrorLocation;
use log::error;

/// Executes forward actions against sources resolved once at startup.
pub struct ContentForwarder {
    sources: BTreeMap<String, String>,
}

impl ContentForwarder {
    /// `sources` maps logical channel keys to the chats holding the stored
    /// content, straight from configuration.
    pub fn new(sources: BTreeMap<String, String>) -> Self {
        Self { sources }
    }

    pub fn configured_keys(&self) -> BTreeSet<String> {
        self.sources.keys().cloned().collect()
    }

    /// Deliver the actions in order, stopping at the first failure.
    ///
    /// A partial delivery is accepted as best-effort; the caller reports a
    /// single failure to the user, not one per undelivered item.
    pub async fn execute(
        &self,
        transport: &dyn ChatTransport,
        chat_id: i64,
        actions: &[ForwardAction],
    ) -> EngineResult<()> {
        for action in actions {
            let Some(source) = self.sources.get(&action.channel_key) else {
                // Graph validation keeps unconfigured triggers inert, so an
                // unresolved key here means the trigger and the sources
                // disagree; fail the delivery rather than skip silently.
                error!(
                    "No source configured for forward {}/{}",
                    action.channel_key, action.message_id
                );
                return Err(EngineError::ForwardDeliveryFailed {
                    channel_key: action.channel_key.clone(),
                    message_id: action.message_id,
                    message: "no source configured".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            };

            transport
                .copy_message(chat_id, source, action.message_id)
                .await
                .map_err(|e| {
                    error!(
                        "Forwarding {}/{} failed: {}",
                        action.channel_key, action.message_id, e
                    );
                    EngineError::ForwardDeliveryFailed {
                        channel_key: action.channel_key.clone(),
                        message_id: action.message_id,
                        message: e.message,
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?;
        }

        Ok(())
    }
}
