//! Bot dependencies (using traits for testability)
//!
//! Central dependency container handed to every verification flow. The
//! pending-passcode store lives here so its lifecycle is the process
//! lifecycle, not any particular flow's.

use anyhow::Result;
use chrono::Duration;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::Config;
use crate::domains::verification::OtpStore;
use crate::kernel::{BaseNotifier, SmtpNotifier};

pub struct BotDeps {
    pub db_pool: SqlitePool,
    pub otp_store: OtpStore,
    pub notifier: Arc<dyn BaseNotifier>,
    pub config: Config,
}

impl BotDeps {
    /// Build production dependencies: SMTP notifier plus a passcode store
    /// with the configured TTL.
    pub fn new(db_pool: SqlitePool, config: Config) -> Result<Self> {
        let notifier = SmtpNotifier::new(
            &config.smtp_host,
            &config.smtp_user,
            &config.smtp_password,
            &config.platform_name,
        )?;

        Ok(Self {
            db_pool,
            otp_store: OtpStore::new(Duration::minutes(config.otp_ttl_minutes)),
            notifier: Arc::new(notifier),
            config,
        })
    }
}
