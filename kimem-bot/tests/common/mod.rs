#![allow(dead_code)]

use kimem_bot::Update;
use kimem_bot::gateway::{GatewaySettings, SessionGateway};

use km_core::ChatMemberStatus;
use km_db::UserRepository;
use km_engine::{
    ChatTransport, ContentForwarder, LedgerSettings, MessageRef, NavigationEngine, ReferralLedger,
    ReplyMarkup, TransportError, build_menu_graph,
};

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    km_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Text { chat_id: i64, text: String },
    Photo { chat_id: i64, caption: String },
    CaptionEdit { chat_id: i64, caption: String },
    Deleted { chat_id: i64, message_id: i64 },
    Copied { chat_id: i64, source: String, message_id: i64 },
}

/// Transport double recording everything the gateway delivers.
pub struct RecordingTransport {
    pub sent: Mutex<Vec<SentMessage>>,
    pub member_status: Mutex<Result<ChatMemberStatus, TransportError>>,
    pub fail_copy_at: Option<usize>,
    pub fail_caption_edits: bool,
    copy_count: Mutex<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            member_status: Mutex::new(Ok(ChatMemberStatus::Member)),
            fail_copy_at: None,
            fail_caption_edits: false,
            copy_count: Mutex::new(0),
        }
    }

    pub fn with_member_status(self, status: ChatMemberStatus) -> Self {
        *self.member_status.lock().unwrap() = Ok(status);
        self
    }

    pub fn with_failing_membership_check(self) -> Self {
        *self.member_status.lock().unwrap() = Err(TransportError::new("network down"));
        self
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|m| match m {
                SentMessage::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn copies(&self) -> Vec<SentMessage> {
        self.sent()
            .into_iter()
            .filter(|m| matches!(m, SentMessage::Copied { .. }))
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        _markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef, TransportError> {
        self.sent.lock().unwrap().push(SentMessage::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(MessageRef { message_id: 100 })
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        _photo: &str,
        caption: &str,
        _markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef, TransportError> {
        self.sent.lock().unwrap().push(SentMessage::Photo {
            chat_id,
            caption: caption.to_string(),
        });
        Ok(MessageRef { message_id: 100 })
    }

    async fn edit_message_caption(
        &self,
        chat_id: i64,
        _message_id: i64,
        caption: &str,
        _markup: Option<ReplyMarkup>,
    ) -> Result<(), TransportError> {
        if self.fail_caption_edits {
            return Err(TransportError::new("message cannot be edited"));
        }
        self.sent.lock().unwrap().push(SentMessage::CaptionEdit {
            chat_id,
            caption: caption.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), TransportError> {
        self.sent
            .lock()
            .unwrap()
            .push(SentMessage::Deleted { chat_id, message_id });
        Ok(())
    }

    async fn copy_message(
        &self,
        dest_chat_id: i64,
        source_chat: &str,
        message_id: i64,
    ) -> Result<(), TransportError> {
        let mut count = self.copy_count.lock().unwrap();
        *count += 1;
        if self.fail_copy_at == Some(*count) {
            return Err(TransportError::new("message to copy not found"));
        }

        self.sent.lock().unwrap().push(SentMessage::Copied {
            chat_id: dest_chat_id,
            source: source_chat.to_string(),
            message_id,
        });
        Ok(())
    }

    async fn get_chat_member_status(
        &self,
        _channel: &str,
        _user_id: i64,
    ) -> Result<ChatMemberStatus, TransportError> {
        self.member_status.lock().unwrap().clone()
    }
}

pub fn test_sources() -> BTreeMap<String, String> {
    [
        ("MAIN".to_string(), "@kimem_db_main".to_string()),
        ("OTHERS".to_string(), "@kimem_db_others".to_string()),
        ("BOOKS".to_string(), "@kimem_db_books".to_string()),
    ]
    .into_iter()
    .collect()
}

pub fn test_settings() -> GatewaySettings {
    GatewaySettings {
        channel_id: "@kimem".to_string(),
        channel_slug: "kimem".to_string(),
        cover_photo: None,
        referral_photo: None,
        developer_channel_url: "https://t.me/yosdevhub".to_string(),
        coins_per_invite: 10,
        handler_timeout: Duration::from_secs(30),
    }
}

/// Gateway over an in-memory store and the full menu catalog.
pub async fn test_gateway(transport: Arc<RecordingTransport>) -> SessionGateway {
    let pool = create_test_pool().await;
    let ledger = ReferralLedger::new(UserRepository::new(pool), LedgerSettings::default());

    let keys: BTreeSet<String> = test_sources().into_keys().collect();
    let nav = NavigationEngine::new(Arc::new(build_menu_graph(&keys).unwrap()));
    let forwarder = ContentForwarder::new(test_sources());

    SessionGateway::new(transport, ledger, nav, forwarder, test_settings())
}

fn parse_update(value: Value) -> Update {
    serde_json::from_value(value).expect("invalid test update")
}

pub fn text_update(chat_id: i64, user_id: i64, first_name: &str, text: &str) -> Update {
    parse_update(json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "from": { "id": user_id, "first_name": first_name },
            "chat": { "id": chat_id },
            "text": text,
        }
    }))
}

pub fn callback_update(chat_id: i64, user_id: i64, first_name: &str, data: &str) -> Update {
    parse_update(json!({
        "update_id": 2,
        "callback_query": {
            "id": "cb1",
            "from": { "id": user_id, "first_name": first_name },
            "message": {
                "message_id": 55,
                "chat": { "id": chat_id },
            },
            "data": data,
        }
    }))
}
