//! Paystack account resolution client.
//!
//! Wraps `GET /bank/resolve`, which maps an account number plus bank code to
//! the registered account holder name.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::resolver::{AccountResolver, ResolveError};
use crate::config::PaystackConfig;
use crate::models::{BankCode, ResolvedAccount};

/// Paystack client for the account resolution endpoint.
#[derive(Clone)]
pub struct PaystackClient {
    client: Client,
    config: PaystackConfig,
}

/// Envelope Paystack wraps every response in.
#[derive(Debug, Deserialize)]
struct PaystackResponse {
    status: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<AccountData>,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    #[serde(default)]
    account_name: Option<String>,
    #[serde(default)]
    bank_id: Option<BankId>,
}

/// Paystack documents `bank_id` as an integer but some fixtures send it as a
/// string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BankId {
    Number(i64),
    Text(String),
}

impl BankId {
    fn into_string(self) -> String {
        match self {
            BankId::Number(id) => id.to_string(),
            BankId::Text(id) => id,
        }
    }
}

impl PaystackClient {
    pub fn new(config: PaystackConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn resolve_url(&self) -> String {
        format!(
            "{}/bank/resolve",
            self.config.api_base_url.trim_end_matches('/')
        )
    }
}

fn transport_error(err: reqwest::Error) -> ResolveError {
    if err.is_timeout() {
        ResolveError::Timeout
    } else {
        ResolveError::Transport(err.to_string())
    }
}

#[async_trait]
impl AccountResolver for PaystackClient {
    async fn resolve(
        &self,
        secret: &Secret<String>,
        account_number: &str,
        bank_code: &BankCode,
    ) -> Result<ResolvedAccount, ResolveError> {
        let response = self
            .client
            .get(self.resolve_url())
            .query(&[
                ("account_number", account_number),
                ("bank_code", bank_code.as_str()),
            ])
            .bearer_auth(secret.expose_secret())
            .header("Content-Type", "application/json")
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        tracing::debug!(status = %status, bank_code = %bank_code, "Paystack resolve response");

        if !status.is_success() {
            let message = serde_json::from_str::<PaystackResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or(body);
            return Err(ResolveError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: PaystackResponse =
            serde_json::from_str(&body).map_err(|e| ResolveError::Decode(e.to_string()))?;

        if !parsed.status {
            return Err(ResolveError::Unresolved(
                parsed
                    .message
                    .unwrap_or_else(|| "status was false".to_string()),
            ));
        }

        let data = parsed
            .data
            .ok_or_else(|| ResolveError::Unresolved("response carried no data".to_string()))?;

        match data.account_name {
            Some(account_name) if !account_name.trim().is_empty() => Ok(ResolvedAccount {
                account_name,
                bank_id: data.bank_id.map(BankId::into_string),
            }),
            _ => Err(ResolveError::Unresolved(
                "response carried no account name".to_string(),
            )),
        }
    }
}
