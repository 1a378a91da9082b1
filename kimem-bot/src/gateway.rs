//! Session gateway: turns inbound updates into engine calls and engine
//! outcomes into outbound messages.
//!
//! Owns the per-chat navigation state. Every update is handled under a
//! bounded timeout and failures never escape a session: the user gets a
//! short notice, the operator gets a log line, the loop keeps running.

use crate::telegram::api::{CallbackQuery, Update};
use crate::texts;

use km_core::{ChatUser, MenuId, SessionState};
use km_engine::{
    ChatTransport, ContentForwarder, InlineButton, NavigationEngine, ReferralLedger,
    ReferralStats, ReplyMarkup, Resolution, catalog,
};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use tokio::sync::Mutex;
use uuid::Uuid;

const CALLBACK_CONTINUE: &str = "continue";
const CALLBACK_CHECK_JOIN: &str = "check_join";
const CALLBACK_SHOW_INVITES: &str = "show_invites";
const CALLBACK_REFERRAL_BACK: &str = "referral_back";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Gating channel, '@'-prefixed, for membership lookups
    pub channel_id: String,
    /// Gating channel without '@', for join URLs
    pub channel_slug: String,
    pub cover_photo: Option<String>,
    pub referral_photo: Option<String>,
    pub developer_channel_url: String,
    pub coins_per_invite: i64,
    pub handler_timeout: Duration,
}

impl GatewaySettings {
    pub fn from_config(config: &km_config::Config) -> Self {
        Self {
            channel_id: config.bot.channel_id(),
            channel_slug: config.bot.channel_slug().to_string(),
            cover_photo: config.assets.cover_photo().map(str::to_string),
            referral_photo: config.assets.referral_photo().map(str::to_string),
            developer_channel_url: config.referral.developer_channel_url.clone(),
            coins_per_invite: config.referral.coins_per_invite,
            handler_timeout: Duration::from_secs(config.polling.handler_timeout_secs),
        }
    }
}

pub struct SessionGateway {
    transport: Arc<dyn ChatTransport>,
    ledger: ReferralLedger,
    nav: NavigationEngine,
    forwarder: ContentForwarder,
    settings: GatewaySettings,
    sessions: Mutex<HashMap<i64, SessionState>>,
}

impl SessionGateway {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        ledger: ReferralLedger,
        nav: NavigationEngine,
        forwarder: ContentForwarder,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            transport,
            ledger,
            nav,
            forwarder,
            settings,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Handle one inbound update to completion, under the handler timeout.
    pub async fn handle_update(&self, update: Update) {
        let correlation = Uuid::new_v4();
        let started = Instant::now();
        let kind = update_kind(&update);

        debug!("[{}] -> {}", correlation, kind);

        match tokio::time::timeout(
            self.settings.handler_timeout,
            self.dispatch(&update, correlation),
        )
        .await
        {
            Ok(()) => info!(
                "[{}] <- {} completed in {}ms",
                correlation,
                kind,
                started.elapsed().as_millis()
            ),
            Err(_elapsed) => error!(
                "[{}] Handler {} timed out after {}s",
                correlation,
                kind,
                self.settings.handler_timeout.as_secs()
            ),
        }
    }

    async fn dispatch(&self, update: &Update, correlation: Uuid) {
        if let Some(message) = &update.message {
            let Some(text) = message.text.as_deref() else {
                return;
            };
            let Some(from) = &message.from else {
                return;
            };
            let user = from.to_chat_user();
            let chat_id = message.chat.id;

            if let Some(referrer) = parse_start(text) {
                self.handle_start(chat_id, &user, referrer, correlation)
                    .await;
            } else if text == catalog::REFERRAL_LABEL {
                self.send_referral_screen(chat_id, &user, correlation).await;
            } else {
                self.handle_label(chat_id, text, correlation).await;
            }
        } else if let Some(callback) = &update.callback_query {
            self.handle_callback(callback, correlation).await;
        }
    }

    /// First contact, returning users, and referral-link starts.
    async fn handle_start(
        &self,
        chat_id: i64,
        user: &ChatUser,
        referrer: Option<i64>,
        correlation: Uuid,
    ) {
        let record = match self.ledger.ensure_user(user, referrer).await {
            Ok(record) => record,
            Err(e) => {
                error!("[{}] ensure_user failed: {}", correlation, e);
                self.notify(chat_id, texts::REFERRAL_UNAVAILABLE).await;
                return;
            }
        };

        // A plain /start from a user who has been through the intro goes
        // straight home; referral-link starts replay the intro.
        if referrer.is_none() && record.has_seen_intro {
            self.notify(chat_id, &texts::welcome_back(&user.first_name))
                .await;
            self.render_home(chat_id).await;
            return;
        }

        if let Err(e) = self.ledger.mark_intro_seen(user.id).await {
            warn!("[{}] mark_intro_seen failed: {}", correlation, e);
        }

        let markup = ReplyMarkup::InlineKeyboard {
            rows: vec![vec![InlineButton::callback(
                texts::CONTINUE_BUTTON,
                CALLBACK_CONTINUE,
            )]],
        };
        self.send_screen(
            chat_id,
            self.settings.cover_photo.as_deref(),
            texts::INTRO_CAPTION,
            Some(markup),
        )
        .await;
    }

    /// Open-phase text labels: menu transitions and content forwards.
    async fn handle_label(&self, chat_id: i64, label: &str, correlation: Uuid) {
        let session = self.sessions.lock().await.get(&chat_id).cloned().unwrap_or_default();

        match self.nav.resolve(label, &session) {
            Resolution::Render { menu, session } => {
                self.render_menu(chat_id, &menu, session).await;
            }
            Resolution::Forward { actions } => {
                if let Err(e) = self
                    .forwarder
                    .execute(self.transport.as_ref(), chat_id, &actions)
                    .await
                {
                    warn!("[{}] {}", correlation, e);
                    self.notify(chat_id, texts::FORWARD_FAILED).await;
                }
            }
            Resolution::Ignored => {
                debug!("[{}] Ignoring unrecognized label", correlation);
            }
        }
    }

    async fn handle_callback(&self, callback: &CallbackQuery, correlation: Uuid) {
        let user = callback.from.to_chat_user();
        let Some(message) = &callback.message else {
            debug!("[{}] Callback without message context", correlation);
            return;
        };
        let chat_id = message.chat.id;

        match callback.data.as_deref() {
            Some(CALLBACK_CONTINUE) => {
                if let Err(e) = self.transport.delete_message(chat_id, message.message_id).await {
                    debug!("[{}] Could not delete intro prompt: {}", correlation, e);
                }

                let display = user
                    .username
                    .clone()
                    .unwrap_or_else(|| user.first_name.clone());
                let markup = ReplyMarkup::InlineKeyboard {
                    rows: vec![
                        vec![InlineButton::url(
                            texts::JOIN_CHANNEL_BUTTON,
                            texts::join_channel_url(&self.settings.channel_slug),
                        )],
                        vec![InlineButton::callback(
                            texts::CONFIRM_JOIN_BUTTON,
                            CALLBACK_CHECK_JOIN,
                        )],
                    ],
                };
                self.send_screen(
                    chat_id,
                    self.settings.cover_photo.as_deref(),
                    &texts::join_prompt(&display),
                    Some(markup),
                )
                .await;
            }

            Some(CALLBACK_CHECK_JOIN) => {
                match self
                    .transport
                    .get_chat_member_status(&self.settings.channel_id, user.id)
                    .await
                {
                    Ok(status) if status.is_joined() => {
                        if let Err(e) =
                            self.transport.delete_message(chat_id, message.message_id).await
                        {
                            debug!("[{}] Could not delete join prompt: {}", correlation, e);
                        }
                        self.render_home(chat_id).await;
                    }
                    Ok(status) => {
                        debug!("[{}] Membership status {}", correlation, status);
                        self.notify(chat_id, texts::NOT_JOINED).await;
                    }
                    Err(e) => {
                        warn!("[{}] Membership check failed: {}", correlation, e);
                        self.notify(chat_id, texts::JOIN_CHECK_FAILED).await;
                    }
                }
            }

            Some(CALLBACK_SHOW_INVITES) => {
                let stats = self.stats_or_default(user.id, correlation).await;
                let text = texts::invites_list(&stats);
                let markup = ReplyMarkup::InlineKeyboard {
                    rows: vec![vec![InlineButton::callback(
                        texts::INVITES_BACK_BUTTON,
                        CALLBACK_REFERRAL_BACK,
                    )]],
                };

                if let Err(e) = self
                    .transport
                    .edit_message_caption(chat_id, message.message_id, &text, Some(markup))
                    .await
                {
                    warn!("[{}] Failed to edit caption: {}", correlation, e);
                    self.notify(chat_id, &text).await;
                }
            }

            Some(CALLBACK_REFERRAL_BACK) => {
                let stats = self.stats_or_default(user.id, correlation).await;
                let caption = texts::referral_caption(
                    &user.first_name,
                    &stats,
                    self.settings.coins_per_invite,
                );

                if let Err(e) = self
                    .transport
                    .edit_message_caption(
                        chat_id,
                        message.message_id,
                        &caption,
                        Some(self.referral_markup()),
                    )
                    .await
                {
                    warn!("[{}] Failed to edit caption: {}", correlation, e);
                    self.notify(chat_id, &caption).await;
                }
            }

            other => {
                debug!("[{}] Unknown callback action {:?}", correlation, other);
            }
        }
    }

    /// The referral screen behind the fixed label.
    async fn send_referral_screen(&self, chat_id: i64, user: &ChatUser, correlation: Uuid) {
        let stats = match self.ledger.ensure_user(user, None).await {
            Ok(record) => ReferralLedger::stats_for(&record),
            Err(e) => {
                error!("[{}] Referral screen unavailable: {}", correlation, e);
                self.notify(chat_id, texts::REFERRAL_UNAVAILABLE).await;
                return;
            }
        };

        let caption =
            texts::referral_caption(&user.first_name, &stats, self.settings.coins_per_invite);
        self.send_screen(
            chat_id,
            self.settings.referral_photo.as_deref(),
            &caption,
            Some(self.referral_markup()),
        )
        .await;
    }

    fn referral_markup(&self) -> ReplyMarkup {
        ReplyMarkup::InlineKeyboard {
            rows: vec![
                vec![InlineButton::callback(
                    texts::YOUR_INVITES_BUTTON,
                    CALLBACK_SHOW_INVITES,
                )],
                vec![InlineButton::url(
                    texts::DEVELOPER_CHANNEL_BUTTON,
                    self.settings.developer_channel_url.clone(),
                )],
            ],
        }
    }

    async fn stats_or_default(&self, user_id: i64, correlation: Uuid) -> ReferralStats {
        match self.ledger.get_stats(user_id).await {
            Ok(stats) => stats,
            Err(e) => {
                error!("[{}] get_stats failed: {}", correlation, e);
                ReferralStats {
                    invited_count: 0,
                    coin_balance: 0,
                    referral_link: self.ledger.referral_link(user_id),
                    invited: Vec::new(),
                }
            }
        }
    }

    async fn render_home(&self, chat_id: i64) {
        if let Resolution::Render { menu, session } = self.nav.render_home() {
            self.render_menu(chat_id, &menu, session).await;
        }
    }

    async fn render_menu(&self, chat_id: i64, menu: &MenuId, session: SessionState) {
        let Some(layout) = self.nav.graph().layout(menu) else {
            return;
        };

        self.sessions.lock().await.insert(chat_id, session);

        let markup = ReplyMarkup::ReplyKeyboard {
            rows: layout.rows.clone(),
        };
        if let Err(e) = self
            .transport
            .send_text(chat_id, &layout.heading, Some(markup))
            .await
        {
            error!("Rendering menu {} failed: {}", menu, e);
        }
    }

    /// Photo screen when an asset is configured, plain text otherwise.
    async fn send_screen(
        &self,
        chat_id: i64,
        photo: Option<&str>,
        caption: &str,
        markup: Option<ReplyMarkup>,
    ) {
        let result = match photo {
            Some(photo) => {
                self.transport
                    .send_photo(chat_id, photo, caption, markup)
                    .await
            }
            None => self.transport.send_text(chat_id, caption, markup).await,
        };

        if let Err(e) = result {
            error!("Sending screen failed: {}", e);
        }
    }

    async fn notify(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.transport.send_text(chat_id, text, None).await {
            error!("Sending notice failed: {}", e);
        }
    }
}

/// `/start` with an optional referral argument. Non-numeric arguments are
/// ignored rather than rejected.
fn parse_start(text: &str) -> Option<Option<i64>> {
    let rest = text.strip_prefix("/start")?;

    if rest.is_empty() {
        return Some(None);
    }

    let arg = rest.strip_prefix(' ')?.trim();
    if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
        Some(arg.parse().ok())
    } else {
        Some(None)
    }
}

fn update_kind(update: &Update) -> &'static str {
    if let Some(message) = &update.message {
        match message.text.as_deref() {
            Some(text) if text.starts_with('/') => "command",
            Some(_) => "label",
            None => "message",
        }
    } else if update.callback_query.is_some() {
        "callback"
    } else {
        "update"
    }
}
