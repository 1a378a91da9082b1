//! Chat-transport boundary consumed by the engine.
//!
//! The engine talks to the outside world only through this trait; the
//! binary supplies the real adapter and tests supply doubles.

use async_trait::async_trait;
use km_core::ChatMemberStatus;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Identifier of a delivered message, for later edits and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub message_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Callback(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub action: ButtonAction,
}

impl InlineButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// Keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    /// Persistent label keyboard rendering a menu layout
    ReplyKeyboard { rows: Vec<Vec<String>> },
    /// Inline buttons under one message
    InlineKeyboard { rows: Vec<Vec<InlineButton>> },
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef, TransportError>;

    /// `photo` is a transport file id or an HTTP URL.
    async fn send_photo(
        &self,
        chat_id: i64,
        photo: &str,
        caption: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef, TransportError>;

    async fn edit_message_caption(
        &self,
        chat_id: i64,
        message_id: i64,
        caption: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<(), TransportError>;

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), TransportError>;

    /// Re-deliver a stored message from `source_chat` into `dest_chat_id`.
    async fn copy_message(
        &self,
        dest_chat_id: i64,
        source_chat: &str,
        message_id: i64,
    ) -> Result<(), TransportError>;

    async fn get_chat_member_status(
        &self,
        channel: &str,
        user_id: i64,
    ) -> Result<ChatMemberStatus, TransportError>;
}
