pub mod error;
pub mod gateway;
pub mod logger;
pub mod telegram;
pub mod texts;

pub use error::{BotError, Result};
pub use gateway::{GatewaySettings, SessionGateway};
pub use telegram::api::{CallbackQuery, Chat, Message, TgUser, Update};
pub use telegram::client::TelegramClient;
