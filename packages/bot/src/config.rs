use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub smtp_host: String,
    pub smtp_user: String,
    pub smtp_password: String,
    pub verify_channel_id: u64,
    pub verified_role_name: String,
    pub platform_name: String,
    pub otp_ttl_minutes: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            discord_token: env::var("DISCORD_TOKEN")
                .context("DISCORD_TOKEN must be set")?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://verify.db".to_string()),
            smtp_host: env::var("SMTP_HOST")
                .unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_user: env::var("SMTP_USER")
                .context("SMTP_USER must be set")?,
            smtp_password: env::var("SMTP_PASSWORD")
                .context("SMTP_PASSWORD must be set")?,
            verify_channel_id: env::var("VERIFY_CHANNEL_ID")
                .context("VERIFY_CHANNEL_ID must be set")?
                .parse()
                .context("VERIFY_CHANNEL_ID must be a valid channel id")?,
            verified_role_name: env::var("VERIFIED_ROLE_NAME")
                .unwrap_or_else(|_| "Freshers".to_string()),
            platform_name: env::var("PLATFORM_NAME")
                .unwrap_or_else(|_| "Discord FROSH".to_string()),
            otp_ttl_minutes: env::var("OTP_TTL_MINUTES")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("OTP_TTL_MINUTES must be a valid number")?,
        })
    }
}
