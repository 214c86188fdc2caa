//! Account verification handler.
//!
//! Validates the payload, checks the Paystack key is configured, then scans
//! the bank-code candidates in order until one resolves.

use futures::FutureExt;
use secrecy::Secret;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use validator::Validate;

use super::error::VerificationError;
use super::metrics;
use super::resolver::AccountResolver;
use crate::dtos::{VerifyAccountRequest, VerifyAccountResponse};
use crate::models::{BankCode, FunctionResponse, Invocation, ResolvedAccount, PAYSTACK_SECRET_KEY};

#[derive(Clone)]
pub struct AccountVerifier {
    resolver: Arc<dyn AccountResolver>,
    bank_codes: Vec<BankCode>,
}

impl AccountVerifier {
    pub fn new(resolver: Arc<dyn AccountResolver>, bank_codes: Vec<BankCode>) -> Self {
        Self {
            resolver,
            bank_codes,
        }
    }

    pub fn bank_codes(&self) -> &[BankCode] {
        &self.bank_codes
    }

    /// Runs one invocation to completion. Always yields exactly one response;
    /// a panic anywhere below is reported as the generic 500.
    pub async fn handle(&self, invocation: &Invocation) -> FunctionResponse {
        let outcome = AssertUnwindSafe(self.verify(invocation))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(error = %detail, "Critical error during account verification");
                Err(VerificationError::Unexpected)
            });

        match outcome {
            Ok(resolved) => {
                metrics::record_verification("resolved");
                FunctionResponse::ok(VerifyAccountResponse::resolved(resolved.account_name))
            }
            Err(err) => {
                metrics::record_verification(err.outcome());
                FunctionResponse::from(err)
            }
        }
    }

    pub async fn verify(
        &self,
        invocation: &Invocation,
    ) -> Result<ResolvedAccount, VerificationError> {
        let request = parse_request(&invocation.payload)?;

        let secret = invocation
            .variables
            .get(PAYSTACK_SECRET_KEY)
            .ok_or_else(|| {
                tracing::error!("{} is not set in the invocation variables", PAYSTACK_SECRET_KEY);
                VerificationError::MissingSecret
            })?;

        self.probe(secret, &request.account_number).await
    }

    /// Tries each candidate strictly in order; the first resolution wins and
    /// no later candidate is called.
    async fn probe(
        &self,
        secret: &Secret<String>,
        account_number: &str,
    ) -> Result<ResolvedAccount, VerificationError> {
        for (attempt, bank_code) in self.bank_codes.iter().enumerate() {
            tracing::info!(
                account_number = %account_number,
                bank_code = %bank_code,
                attempt = attempt + 1,
                "Trying to resolve account"
            );

            match self.resolver.resolve(secret, account_number, bank_code).await {
                Ok(resolved) => {
                    metrics::record_attempt(bank_code.as_str(), "resolved");
                    tracing::info!(
                        account_number = %account_number,
                        bank_code = %bank_code,
                        bank_id = resolved.bank_id.as_deref().unwrap_or("-"),
                        "Account resolved"
                    );
                    return Ok(resolved);
                }
                Err(err) => {
                    metrics::record_attempt(bank_code.as_str(), err.kind());
                    tracing::warn!(
                        bank_code = %bank_code,
                        error = %err,
                        "Paystack resolution failed for bank"
                    );
                }
            }
        }

        tracing::info!(
            account_number = %account_number,
            candidates = self.bank_codes.len(),
            "No candidate bank resolved the account"
        );
        Err(VerificationError::NotResolved)
    }
}

fn parse_request(payload: &str) -> Result<VerifyAccountRequest, VerificationError> {
    let value: serde_json::Value = serde_json::from_str(payload).map_err(|e| {
        tracing::debug!(error = %e, "Payload is not valid JSON");
        VerificationError::InvalidAccountNumber
    })?;

    if !value.is_object() {
        return Err(VerificationError::InvalidAccountNumber);
    }

    let request: VerifyAccountRequest = serde_json::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, "Payload has no usable accountNumber");
        VerificationError::InvalidAccountNumber
    })?;

    request.validate().map_err(|e| {
        tracing::debug!(error = %e, "Account number failed validation");
        VerificationError::InvalidAccountNumber
    })?;

    Ok(request)
}
