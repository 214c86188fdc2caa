use axum::http::StatusCode;
use thiserror::Error;

use crate::dtos::VerifyAccountResponse;
use crate::models::FunctionResponse;

/// Terminal outcomes of a verification other than success. The display
/// text is exactly what the caller receives; internal detail is logged
/// where the error is raised and never carried here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Server configuration error: Missing Paystack key.")]
    MissingSecret,

    #[error("Invalid account number provided. It must be a 10-digit string.")]
    InvalidAccountNumber,

    #[error("Could not verify account details with common banks. Please check the number or try again later.")]
    NotResolved,

    #[error("An unexpected error occurred during verification.")]
    Unexpected,
}

impl VerificationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VerificationError::MissingSecret | VerificationError::Unexpected => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            VerificationError::InvalidAccountNumber => StatusCode::BAD_REQUEST,
            VerificationError::NotResolved => StatusCode::NOT_FOUND,
        }
    }

    /// Metric label for the outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            VerificationError::MissingSecret => "config_error",
            VerificationError::InvalidAccountNumber => "input_error",
            VerificationError::NotResolved => "not_found",
            VerificationError::Unexpected => "unexpected_error",
        }
    }
}

impl From<VerificationError> for FunctionResponse {
    fn from(err: VerificationError) -> Self {
        FunctionResponse::with_status(
            VerifyAccountResponse::failure(err.to_string()),
            err.status_code(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_outcome_to_its_status() {
        assert_eq!(
            VerificationError::MissingSecret.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            VerificationError::InvalidAccountNumber.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            VerificationError::NotResolved.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            VerificationError::Unexpected.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_body_carries_message() {
        let response = FunctionResponse::from(VerificationError::MissingSecret);
        assert!(!response.body.success);
        assert_eq!(
            response.body.message.as_deref(),
            Some("Server configuration error: Missing Paystack key.")
        );
        assert!(response.body.account_name.is_none());
    }
}
