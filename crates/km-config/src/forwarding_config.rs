use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

/// Sources for content forwarding: logical channel key (e.g. "MAIN",
/// "BOOKS") mapped to the chat the stored content lives in.
///
/// Absence of a key is not an error; every trigger that needs it is left
/// unconfigured at startup.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ForwardingConfig {
    pub channels: BTreeMap<String, String>,
}

impl ForwardingConfig {
    pub fn source_for(&self, channel_key: &str) -> Option<&str> {
        self.channels.get(channel_key).map(String::as_str)
    }

    pub fn configured_keys(&self) -> BTreeSet<String> {
        self.channels.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
