//! Referral ledger: creates user records on first contact, credits
//! referrers exactly once per distinct invitee, and serves referral
//! statistics.
//!
//! Crediting is a read-modify-write against the referrer's record, made
//! safe under concurrency by a conditional update on the record's version:
//! a stale write does not apply and the whole read-check-write cycle is
//! retried. The duplicate-invitee check therefore always runs against the
//! state that the final write lands on.

use crate::{EngineError, Result as EngineResult};

use km_core::{ChatUser, InvitedEntry, UserRecord};
use km_db::UserRepository;

use std::panic::Location;
use std::time::Duration;

use chrono::Utc;
use error_location::ErrorLocation;
use log::{debug, error, info, warn};

const DEFAULT_COINS_PER_INVITE: i64 = 10;
const DEFAULT_MAX_CREDIT_ATTEMPTS: u32 = 3;
const CREDIT_RETRY_BASE_DELAY_MS: u64 = 25;

#[derive(Debug, Clone)]
pub struct LedgerSettings {
    pub coins_per_invite: i64,
    /// Bot username referral links point at
    pub bot_username: String,
    /// Attempts for the conditional credit update before giving up
    pub max_credit_attempts: u32,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            coins_per_invite: DEFAULT_COINS_PER_INVITE,
            bot_username: String::from("kimemuatbot"),
            max_credit_attempts: DEFAULT_MAX_CREDIT_ATTEMPTS,
        }
    }
}

/// Snapshot served to the referral screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralStats {
    pub invited_count: usize,
    pub coin_balance: i64,
    pub referral_link: String,
    pub invited: Vec<InvitedEntry>,
}

pub struct ReferralLedger {
    repo: UserRepository,
    settings: LedgerSettings,
}

impl ReferralLedger {
    pub fn new(repo: UserRepository, settings: LedgerSettings) -> Self {
        Self { repo, settings }
    }

    /// Deterministic invite link for a user id.
    pub fn referral_link(&self, user_id: i64) -> String {
        format!("https://t.me/{}?start={}", self.settings.bot_username, user_id)
    }

    /// Look the user up, creating the record on first contact.
    ///
    /// A referrer is credited only when this call actually creates the
    /// record, the referrer is someone else, and that someone exists. If
    /// persistence fails the caller still gets a usable in-memory record;
    /// the session must not crash over a store outage.
    pub async fn ensure_user(
        &self,
        user: &ChatUser,
        referrer_id: Option<i64>,
    ) -> EngineResult<UserRecord> {
        let key = user.id.to_string();

        let existing = match self.repo.find_by_id(&key).await {
            Ok(found) => found,
            Err(e) => {
                error!("Lookup of user {} failed: {}", key, e);
                None
            }
        };
        if let Some(record) = existing {
            return Ok(record);
        }

        let record = UserRecord::new(user, self.referral_link(user.id));

        match self.repo.create(&record).await {
            Ok(()) => {}
            Err(e) if e.is_unique_violation() => {
                // Lost a duplicate-start race; the winning call owns the
                // create and any referral credit.
                debug!("User {} was created concurrently", key);
                return match self.repo.find_by_id(&key).await {
                    Ok(Some(found)) => Ok(found),
                    _ => Ok(record),
                };
            }
            Err(e) => {
                error!("Persisting new user {} failed: {}", key, e);
                return Ok(record);
            }
        }

        if let Some(referrer) = referrer_id
            && referrer != user.id
            && let Err(e) = self.credit_referral(referrer, user).await
        {
            // The invitee's own flow continues regardless
            warn!("Crediting referrer {} failed: {}", referrer, e);
        }

        Ok(record)
    }

    /// Award the per-invite coins to `referrer_id` for `invitee`, exactly
    /// once per distinct invitee.
    ///
    /// An unknown referrer (garbled or stale referral code) is a silent
    /// no-op, as is an invitee already present in the history.
    pub async fn credit_referral(&self, referrer_id: i64, invitee: &ChatUser) -> EngineResult<()> {
        let key = referrer_id.to_string();

        for attempt in 1..=self.settings.max_credit_attempts {
            let Some(mut referrer) = self.repo.find_by_id(&key).await? else {
                debug!("Ignoring referral code for unknown referrer {}", key);
                return Ok(());
            };

            if referrer.has_invited(invitee.id) {
                debug!(
                    "Referrer {} already credited for invitee {}",
                    key, invitee.id
                );
                return Ok(());
            }

            let expected_version = referrer.version;
            referrer.invited.push(InvitedEntry {
                user_id: invitee.id,
                name: invitee.full_name(),
                date: Utc::now(),
            });
            referrer.coin_balance += self.settings.coins_per_invite;
            referrer.version += 1;

            if self.repo.update_credit(&referrer, expected_version).await? {
                info!(
                    "Credited referrer {} for invitee {} ({} coins, {} invites)",
                    key,
                    invitee.id,
                    referrer.coin_balance,
                    referrer.invited.len()
                );
                return Ok(());
            }

            debug!("Credit conflict for referrer {}, attempt {}", key, attempt);
            let jitter = 0.75 + rand::random::<f64>() * 0.5;
            let delay_ms = CREDIT_RETRY_BASE_DELAY_MS * u64::from(attempt);
            tokio::time::sleep(Duration::from_secs_f64(delay_ms as f64 / 1000.0 * jitter)).await;
        }

        Err(EngineError::CreditConflict {
            referrer_id: key,
            attempts: self.settings.max_credit_attempts,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Pure read; absent users get zeroed stats with a computed link.
    pub async fn get_stats(&self, user_id: i64) -> EngineResult<ReferralStats> {
        let record = self.repo.find_by_id(&user_id.to_string()).await?;

        Ok(match record {
            Some(record) => Self::stats_for(&record),
            None => ReferralStats {
                invited_count: 0,
                coin_balance: 0,
                referral_link: self.referral_link(user_id),
                invited: Vec::new(),
            },
        })
    }

    /// One-shot intro flag; repeated calls are no-ops.
    pub async fn mark_intro_seen(&self, user_id: i64) -> EngineResult<()> {
        self.repo.set_intro_seen(&user_id.to_string()).await?;
        Ok(())
    }

    pub fn stats_for(record: &UserRecord) -> ReferralStats {
        ReferralStats {
            invited_count: record.invited_count(),
            coin_balance: record.coin_balance,
            referral_link: record.referral_link.clone(),
            invited: record.invited.clone(),
        }
    }
}
