//! User-record store: get-by-key, create, and the partial updates the
//! referral ledger performs.
//!
//! Every call is bounded by a timeout; an elapsed call fails as
//! `StorageUnavailable` rather than blocking the session. The credit update
//! is conditional on the record's optimistic `version` so concurrent credits
//! against the same referrer cannot both apply on a stale read.

use crate::{DbError, Result as DbErrorResult};

use km_core::{InvitedEntry, UserRecord};

use std::panic::Location;
use std::time::Duration;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

pub struct UserRepository {
    pool: SqlitePool,
    call_timeout: Duration,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_call_timeout(pool: SqlitePool, call_timeout: Duration) -> Self {
        Self { pool, call_timeout }
    }

    pub async fn find_by_id(&self, user_id: &str) -> DbErrorResult<Option<UserRecord>> {
        let query = sqlx::query(
            r#"
                SELECT user_id, first_name, username, created_at, referral_link,
                    coin_balance, invited, has_seen_intro, version
                FROM km_users
                WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool);

        let row = self.bounded("find_by_id", query).await?;

        row.map(|r| -> DbErrorResult<UserRecord> {
            let created_at: i64 = r.try_get("created_at")?;
            let invited_json: String = r.try_get("invited")?;
            let has_seen_intro: i64 = r.try_get("has_seen_intro")?;

            let invited: Vec<InvitedEntry> =
                serde_json::from_str(&invited_json).map_err(|e| DbError::Decode {
                    message: format!("Invalid JSON in km_users.invited: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            Ok(UserRecord {
                user_id: r.try_get("user_id")?,
                first_name: r.try_get("first_name")?,
                username: r.try_get("username")?,
                created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
                    DbError::Decode {
                        message: "Invalid timestamp in km_users.created_at".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?,
                referral_link: r.try_get("referral_link")?,
                coin_balance: r.try_get("coin_balance")?,
                invited,
                has_seen_intro: has_seen_intro != 0,
                version: r.try_get("version")?,
            })
        })
        .transpose()
    }

    pub async fn create(&self, record: &UserRecord) -> DbErrorResult<()> {
        let invited_json = encode_invited(&record.invited)?;
        let created_at = record.created_at.timestamp();

        let query = sqlx::query(
            r#"
                INSERT INTO km_users (
                    user_id, first_name, username, created_at, referral_link,
                    coin_balance, invited, has_seen_intro, version
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.user_id)
        .bind(&record.first_name)
        .bind(&record.username)
        .bind(created_at)
        .bind(&record.referral_link)
        .bind(record.coin_balance)
        .bind(invited_json)
        .bind(record.has_seen_intro as i64)
        .bind(record.version)
        .execute(&self.pool);

        self.bounded("create", query).await?;

        Ok(())
    }

    /// Persist a credit: balance and invited list written as one row update,
    /// applied only if the row still carries `expected_version`.
    ///
    /// Returns false when the row changed underneath the caller (or the
    /// referrer vanished); the caller re-reads and retries.
    pub async fn update_credit(
        &self,
        record: &UserRecord,
        expected_version: i64,
    ) -> DbErrorResult<bool> {
        let invited_json = encode_invited(&record.invited)?;

        let query = sqlx::query(
            r#"
                UPDATE km_users
                SET coin_balance = ?, invited = ?, version = ?
                WHERE user_id = ? AND version = ?
            "#,
        )
        .bind(record.coin_balance)
        .bind(invited_json)
        .bind(record.version)
        .bind(&record.user_id)
        .bind(expected_version)
        .execute(&self.pool);

        let result = self.bounded("update_credit", query).await?;

        Ok(result.rows_affected() > 0)
    }

    /// One-shot intro flag; setting an already-set flag is a no-op.
    pub async fn set_intro_seen(&self, user_id: &str) -> DbErrorResult<()> {
        let query = sqlx::query(
            r#"
                UPDATE km_users
                SET has_seen_intro = 1
                WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(&self.pool);

        self.bounded("set_intro_seen", query).await?;

        Ok(())
    }

    /// Bound a store call; an elapsed timeout surfaces as unavailable.
    async fn bounded<T, E>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = std::result::Result<T, E>>,
    ) -> DbErrorResult<T>
    where
        DbError: From<E>,
    {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => result.map_err(DbError::from),
            Err(_elapsed) => Err(DbError::StorageUnavailable {
                operation,
                timeout_secs: self.call_timeout.as_secs(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

fn encode_invited(invited: &[InvitedEntry]) -> DbErrorResult<String> {
    serde_json::to_string(invited).map_err(|e| DbError::Decode {
        message: format!("Cannot encode invited list: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}
