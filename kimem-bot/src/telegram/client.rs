//! Long-polling Bot API client, doubling as the engine's chat transport.

use crate::telegram::api::{ApiResponse, ChatMember, Message, Update};

use km_core::ChatMemberStatus;
use km_engine::{ButtonAction, ChatTransport, MessageRef, ReplyMarkup, TransportError};

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const API_BASE: &str = "https://api.telegram.org";

pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    /// `request_timeout` must exceed the long-poll wait or getUpdates would
    /// time out client-side first.
    pub fn new(token: &str, request_timeout: Duration) -> Result<Self, TransportError> {
        Self::with_base_url(format!("{}/bot{}", API_BASE, token), request_timeout)
    }

    /// Point the client at a different API host (tests).
    pub fn with_base_url(
        base_url: String,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| TransportError::new(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: Value,
    ) -> Result<T, TransportError> {
        let url = format!("{}/{}", self.base_url, method);

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TransportError::new(format!("{} request failed: {}", method, e)))?;

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| TransportError::new(format!("{} returned invalid body: {}", method, e)))?;

        if !body.ok {
            return Err(TransportError::new(format!(
                "{} rejected: {}",
                method,
                body.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        body.result
            .ok_or_else(|| TransportError::new(format!("{} returned empty result", method)))
    }

    /// Fetch the next batch of updates, waiting up to `timeout_secs`.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TransportError> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    /// Acknowledge a callback query so the client stops its spinner.
    pub async fn answer_callback_query(&self, callback_id: &str) -> Result<(), TransportError> {
        self.call::<Value>("answerCallbackQuery", json!({ "callback_query_id": callback_id }))
            .await?;
        Ok(())
    }
}

fn markup_json(markup: &ReplyMarkup) -> Value {
    match markup {
        ReplyMarkup::ReplyKeyboard { rows } => json!({
            "keyboard": rows,
            "resize_keyboard": true,
        }),
        ReplyMarkup::InlineKeyboard { rows } => {
            let rows: Vec<Vec<Value>> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| match &button.action {
                            ButtonAction::Callback(data) => json!({
                                "text": button.text,
                                "callback_data": data,
                            }),
                            ButtonAction::Url(url) => json!({
                                "text": button.text,
                                "url": url,
                            }),
                        })
                        .collect()
                })
                .collect();
            json!({ "inline_keyboard": rows })
        }
    }
}

fn with_markup(mut payload: Value, markup: Option<ReplyMarkup>) -> Value {
    if let Some(markup) = markup
        && let Some(object) = payload.as_object_mut()
    {
        object.insert("reply_markup".to_string(), markup_json(&markup));
    }
    payload
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef, TransportError> {
        let payload = with_markup(json!({ "chat_id": chat_id, "text": text }), markup);
        let message: Message = self.call("sendMessage", payload).await?;

        Ok(MessageRef {
            message_id: message.message_id,
        })
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: &str,
        caption: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef, TransportError> {
        let payload = with_markup(
            json!({ "chat_id": chat_id, "photo": photo, "caption": caption }),
            markup,
        );
        let message: Message = self.call("sendPhoto", payload).await?;

        Ok(MessageRef {
            message_id: message.message_id,
        })
    }

    async fn edit_message_caption(
        &self,
        chat_id: i64,
        message_id: i64,
        caption: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<(), TransportError> {
        let payload = with_markup(
            json!({ "chat_id": chat_id, "message_id": message_id, "caption": caption }),
            markup,
        );
        self.call::<Value>("editMessageCaption", payload).await?;

        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), TransportError> {
        self.call::<Value>(
            "deleteMessage",
            json!({ "chat_id": chat_id, "message_id": message_id }),
        )
        .await?;

        Ok(())
    }

    async fn copy_message(
        &self,
        dest_chat_id: i64,
        source_chat: &str,
        message_id: i64,
    ) -> Result<(), TransportError> {
        debug!(
            "Copying message {} from {} to {}",
            message_id, source_chat, dest_chat_id
        );

        self.call::<Value>(
            "copyMessage",
            json!({
                "chat_id": dest_chat_id,
                "from_chat_id": source_chat,
                "message_id": message_id,
            }),
        )
        .await?;

        Ok(())
    }

    async fn get_chat_member_status(
        &self,
        channel: &str,
        user_id: i64,
    ) -> Result<ChatMemberStatus, TransportError> {
        let member: ChatMember = self
            .call(
                "getChatMember",
                json!({ "chat_id": channel, "user_id": user_id }),
            )
            .await?;

        Ok(ChatMemberStatus::from_str(&member.status).unwrap_or(ChatMemberStatus::Unknown))
    }
}
