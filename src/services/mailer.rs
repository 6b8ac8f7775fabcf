//! Outbound email for price-increase alerts.
//!
//! The destination is a single operator address from configuration; it
//! is unrelated to the emails stored in the alerts table.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use rust_decimal::Decimal;

use crate::models::chain::Chain;

/// Sends the threshold-breach notification. The alert job treats a
/// failed send as a logged no-op, so implementations only report the
/// outcome.
#[async_trait]
pub trait PriceIncreaseNotifier: Send + Sync {
    async fn notify_price_increase(
        &self,
        chain: Chain,
        current_price: Decimal,
        increase_pct: Decimal,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub struct MailerService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl MailerService {
    pub fn new(
        smtp_host: &str,
        username: String,
        password: String,
        to: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let from: Mailbox = username.parse()?;
        let to: Mailbox = to.parse()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_host)?
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

#[async_trait]
impl PriceIncreaseNotifier for MailerService {
    async fn notify_price_increase(
        &self,
        chain: Chain,
        current_price: Decimal,
        increase_pct: Decimal,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(price_increase_subject(chain, increase_pct))
            .body(price_increase_body(chain, current_price))?;

        self.transport.send(message).await?;

        tracing::info!(chain = %chain, "Price increase alert email sent");
        Ok(())
    }
}

pub fn price_increase_subject(chain: Chain, increase_pct: Decimal) -> String {
    format!(
        "Price Increase Alert: {} price increased by {:.2}%",
        chain, increase_pct
    )
}

pub fn price_increase_body(chain: Chain, current_price: Decimal) -> String {
    format!(
        "The price of {} has increased by more than 3% in the last hour. Current price: ${:.2}",
        chain, current_price
    )
}
