use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyAccountRequest {
    /// NUBAN account number.
    #[serde(rename = "accountNumber")]
    #[validate(
        length(equal = 10, message = "Account number must be 10 characters"),
        custom(function = "ascii_digits")
    )]
    pub account_number: String,
}

fn ascii_digits(value: &str) -> Result<(), ValidationError> {
    if value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("ascii_digits"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAccountResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyAccountResponse {
    pub fn resolved(account_name: impl Into<String>) -> Self {
        Self {
            success: true,
            account_name: Some(account_name.into()),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            account_name: None,
            message: Some(message.into()),
        }
    }
}
