use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::chain::Chain;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAlertRequest {
    pub chain: Chain,
    pub target_price: Decimal,
    pub email: String,
}

/// Minimal syntactic email check: one '@' with a non-empty local part
/// and a dotted domain. Anything fancier belongs to the mail provider.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if domain.contains('@') || email.contains(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
