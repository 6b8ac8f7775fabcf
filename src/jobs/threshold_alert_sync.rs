//! Threshold Alert Job
//!
//! Hourly sweep over the price time series. For each tracked chain it
//! compares the most recent sample against the earliest sample inside
//! the trailing 1-hour window and emails the operator address when the
//! increase exceeds 3%. There is no suppression state: if the window
//! still shows a breach on the next run, another email goes out.

use chrono::{Duration as ChronoDuration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder};
use std::env;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};

use crate::entities::{prelude::*, prices};
use crate::models::chain::Chain;
use crate::services::mailer::{MailerService, PriceIncreaseNotifier};

/// Default check interval in seconds (1 hour)
const DEFAULT_ALERT_INTERVAL_SECS: u64 = 3600;

/// Trailing window over which the increase is measured, in seconds
const WINDOW_SECS: i64 = 3600;

/// A notification fires only when the increase is strictly above this
const INCREASE_THRESHOLD_PCT: Decimal = dec!(3);

/// Environment variable for the check interval
const ENV_ALERT_INTERVAL: &str = "PRICE_ALERT_INTERVAL_SECS";

/// Environment variable for the SMTP relay host
const ENV_SMTP_HOST: &str = "SMTP_HOST";

/// Environment variable for the SMTP account / from address
const ENV_EMAIL_USER: &str = "EMAIL_USER";

/// Environment variable for the SMTP password
const ENV_EMAIL_PASS: &str = "EMAIL_PASS";

/// Environment variable for the fixed operator destination address
const ENV_ALERT_EMAIL_TO: &str = "ALERT_EMAIL_TO";

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Start the threshold alert job
///
/// Spawns a background task that checks every tracked chain on a fixed
/// interval (default: 1 hour). SMTP configuration comes from the
/// environment; if it is missing the job logs a warning and disables
/// itself instead of failing the process.
///
/// # Environment Variables
///
/// * `EMAIL_USER` / `EMAIL_PASS` - SMTP credentials (required)
/// * `ALERT_EMAIL_TO` - destination address (required)
/// * `SMTP_HOST` - SMTP relay (default: smtp.gmail.com)
/// * `PRICE_ALERT_INTERVAL_SECS` - interval in seconds (default: 3600)
pub async fn start_threshold_alert_job(db: DatabaseConnection) {
    tokio::spawn(async move {
        let email_user = match env::var(ENV_EMAIL_USER) {
            Ok(user) => user,
            Err(_) => {
                warn!("EMAIL_USER not set - threshold alert job disabled");
                return;
            }
        };

        let email_pass = match env::var(ENV_EMAIL_PASS) {
            Ok(pass) => pass,
            Err(_) => {
                warn!("EMAIL_PASS not set - threshold alert job disabled");
                return;
            }
        };

        let alert_email_to = match env::var(ENV_ALERT_EMAIL_TO) {
            Ok(to) => to,
            Err(_) => {
                warn!("ALERT_EMAIL_TO not set - threshold alert job disabled");
                return;
            }
        };

        let smtp_host =
            env::var(ENV_SMTP_HOST).unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string());

        let alert_interval_secs: u64 = env::var(ENV_ALERT_INTERVAL)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ALERT_INTERVAL_SECS);

        let mailer =
            match MailerService::new(&smtp_host, email_user, email_pass, &alert_email_to) {
                Ok(mailer) => mailer,
                Err(e) => {
                    error!(error = %e, "Failed to initialize mailer - threshold alert job disabled");
                    return;
                }
            };

        info!(
            alert_interval_secs = alert_interval_secs,
            smtp_host = %smtp_host,
            "Starting threshold alert job"
        );

        let mut interval = interval(Duration::from_secs(alert_interval_secs));

        loop {
            interval.tick().await;
            check_price_increase(&db, &mailer).await;
        }
    });
}

/// Run one detection cycle over all tracked chains.
///
/// A chain is skipped silently when it has no sample at all or no
/// sample inside the trailing window, and with a warning when the
/// baseline price is not positive. Store or mail failures are logged
/// and never abort the cycle.
pub async fn check_price_increase(db: &DatabaseConnection, notifier: &impl PriceIncreaseNotifier) {
    info!(
        "Checking for price increase greater than {}% in the last hour",
        INCREASE_THRESHOLD_PCT
    );

    let cutoff = (Utc::now() - ChronoDuration::seconds(WINDOW_SECS)).fixed_offset();

    for chain in Chain::ALL {
        let latest = match Prices::find()
            .filter(prices::Column::Chain.eq(chain.as_str()))
            .order_by(prices::Column::Timestamp, Order::Desc)
            .one(db)
            .await
        {
            Ok(Some(sample)) => sample,
            Ok(None) => continue,
            Err(e) => {
                error!(chain = %chain, error = %e, "Failed to query latest price");
                continue;
            }
        };

        let baseline = match Prices::find()
            .filter(prices::Column::Chain.eq(chain.as_str()))
            .filter(prices::Column::Timestamp.gt(cutoff))
            .order_by(prices::Column::Timestamp, Order::Asc)
            .one(db)
            .await
        {
            Ok(Some(sample)) => sample,
            Ok(None) => continue,
            Err(e) => {
                error!(chain = %chain, error = %e, "Failed to query baseline price");
                continue;
            }
        };

        let Some(increase_pct) = compute_increase_pct(latest.price, baseline.price) else {
            warn!(
                chain = %chain,
                baseline = %baseline.price,
                "Skipping chain with non-positive baseline price"
            );
            continue;
        };

        if increase_pct > INCREASE_THRESHOLD_PCT {
            info!(
                chain = %chain,
                price = %latest.price,
                increase_pct = %increase_pct,
                "Price increase threshold breached"
            );

            if let Err(e) = notifier
                .notify_price_increase(chain, latest.price, increase_pct)
                .await
            {
                error!(chain = %chain, error = %e, "Failed to send price increase alert email");
            }
        }
    }
}

/// Percentage change from `baseline` to `latest`. `None` when the
/// baseline is not positive, which the caller treats as no-signal.
pub(crate) fn compute_increase_pct(latest: Decimal, baseline: Decimal) -> Option<Decimal> {
    if baseline <= Decimal::ZERO {
        return None;
    }
    Some((latest - baseline) / baseline * dec!(100))
}
