//! SMTP passcode delivery via lettre

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::kernel::BaseNotifier;

/// Sends passcode emails over authenticated STARTTLS SMTP.
///
/// The sender address doubles as the SMTP username, matching the usual
/// app-password setup on hosted providers.
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    platform_name: String,
}

impl SmtpNotifier {
    pub fn new(
        smtp_host: &str,
        smtp_user: &str,
        smtp_password: &str,
        platform_name: &str,
    ) -> Result<Self> {
        let creds = Credentials::new(smtp_user.to_string(), smtp_password.to_string());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_host)
            .context("building SMTP transport")?
            .credentials(creds)
            .build();

        Ok(Self {
            mailer,
            from_address: smtp_user.to_string(),
            platform_name: platform_name.to_string(),
        })
    }
}

#[async_trait]
impl BaseNotifier for SmtpNotifier {
    async fn send_passcode(&self, email: &str, code: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from_address.parse().context("invalid sender address")?)
            .to(email.parse().context("invalid recipient address")?)
            .subject(format!("{} verification mail", self.platform_name))
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Your OTP is {code}. Please use this to complete your verification."
            ))
            .context("building passcode email")?;

        self.mailer
            .send(message)
            .await
            .context("sending passcode email")?;

        info!("Passcode email sent to {}", email);
        Ok(())
    }
}
