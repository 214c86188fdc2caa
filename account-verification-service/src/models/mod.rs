pub mod bank_code;
pub mod invocation;

pub use bank_code::{default_bank_codes, BankCode, BankCodeError};
pub use invocation::{FunctionResponse, FunctionVariables, Invocation, PAYSTACK_SECRET_KEY};

/// Account holder details returned by the provider for one bank code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccount {
    pub account_name: String,
    /// Provider-side bank identifier. Logged only; never sent to callers.
    pub bank_id: Option<String>,
}
