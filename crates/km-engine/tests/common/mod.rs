#![allow(dead_code)]

use km_core::ChatMemberStatus;
use km_engine::{ChatTransport, MessageRef, ReplyMarkup, TransportError};

use std::sync::Mutex;

use async_trait::async_trait;
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

/// Transport double that records copy deliveries and can fail the Nth one.
pub struct RecordingTransport {
    pub copies: Mutex<Vec<(i64, String, i64)>>,
    pub fail_copy_at: Option<usize>,
    pub member_status: Mutex<ChatMemberStatus>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            copies: Mutex::new(Vec::new()),
            fail_copy_at: None,
            member_status: Mutex::new(ChatMemberStatus::Member),
        }
    }

    /// Fail the `n`th copy call (1-based); earlier calls still deliver.
    pub fn failing_copy_at(n: usize) -> Self {
        Self {
            fail_copy_at: Some(n),
            ..Self::new()
        }
    }

    pub fn copied(&self) -> Vec<(i64, String, i64)> {
        self.copies.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(
        &self,
        _chat_id: i64,
        _text: &str,
        _markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef, TransportError> {
        Ok(MessageRef { message_id: 1 })
    }

    async fn send_photo(
        &self,
        _chat_id: i64,
        _photo: &str,
        _caption: &str,
        _markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef, TransportError> {
        Ok(MessageRef { message_id: 1 })
    }

    async fn edit_message_caption(
        &self,
        _chat_id: i64,
        _message_id: i64,
        _caption: &str,
        _markup: Option<ReplyMarkup>,
    ) -> Result<(), TransportError> {
        Ok(())
    }

    async fn delete_message(&self, _chat_id: i64, _message_id: i64) -> Result<(), TransportError> {
        Ok(())
    }

    async fn copy_message(
        &self,
        dest_chat_id: i64,
        source_chat: &str,
        message_id: i64,
    ) -> Result<(), TransportError> {
        let mut copies = self.copies.lock().unwrap();
        let call_index = copies.len() + 1;

        if self.fail_copy_at == Some(call_index) {
            return Err(TransportError::new("message to copy not found"));
        }

        copies.push((dest_chat_id, source_chat.to_string(), message_id));
        Ok(())
    }

    async fn get_chat_member_status(
        &self,
        _channel: &str,
        _user_id: i64,
    ) -> Result<ChatMemberStatus, TransportError> {
        Ok(*self.member_status.lock().unwrap())
    }
}
