use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::models::{BankCode, ResolvedAccount};

/// Why a single bank-code candidate did not resolve. Never fatal to the
/// request; the verifier logs it and moves on.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider returned status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("account not resolved: {0}")]
    Unresolved(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ResolveError {
    /// Metric label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::Timeout => "timeout",
            ResolveError::Transport(_) => "transport_error",
            ResolveError::Rejected { .. } => "rejected",
            ResolveError::Unresolved(_) => "unresolved",
            ResolveError::Decode(_) => "decode_error",
        }
    }
}

/// Looks up the holder of `account_number` at the bank identified by
/// `bank_code`.
#[async_trait]
pub trait AccountResolver: Send + Sync {
    async fn resolve(
        &self,
        secret: &Secret<String>,
        account_number: &str,
        bank_code: &BankCode,
    ) -> Result<ResolvedAccount, ResolveError>;
}
