use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

use crate::models::{default_bank_codes, BankCode};

const DEFAULT_PAYSTACK_API_BASE_URL: &str = "https://api.paystack.co";
const DEFAULT_PAYSTACK_TIMEOUT_MS: u64 = 5000;
/// Upper bound for one Paystack call; worst-case latency is this times the
/// number of bank codes.
const MAX_PAYSTACK_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct VerificationConfig {
    pub common: core_config::Config,
    pub paystack: PaystackConfig,
    pub resolution: ResolutionConfig,
    pub service_name: String,
}

#[derive(Debug, Clone)]
pub struct PaystackConfig {
    /// Missing is allowed at startup; every verification then answers 500.
    pub secret_key: Option<Secret<String>>,
    pub api_base_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ResolutionConfig {
    /// Candidates in probe order.
    pub bank_codes: Vec<BankCode>,
}

impl Default for PaystackConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            api_base_url: DEFAULT_PAYSTACK_API_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_PAYSTACK_TIMEOUT_MS),
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            bank_codes: default_bank_codes(),
        }
    }
}

impl VerificationConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let secret_key = env::var("PAYSTACK_SECRET_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(Secret::new);

        let api_base_url = env::var("PAYSTACK_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_PAYSTACK_API_BASE_URL.to_string());

        let request_timeout = match env::var("PAYSTACK_TIMEOUT_MS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_millis(DEFAULT_PAYSTACK_TIMEOUT_MS),
        };

        let bank_codes = match env::var("VERIFY_BANK_CODES") {
            Ok(raw) => parse_bank_codes(&raw)?,
            Err(_) => default_bank_codes(),
        };

        Ok(Self {
            common,
            paystack: PaystackConfig {
                secret_key,
                api_base_url,
                request_timeout,
            },
            resolution: ResolutionConfig { bank_codes },
            service_name: "account-verification-service".to_string(),
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, AppError> {
    let millis: u64 = raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("PAYSTACK_TIMEOUT_MS is invalid: {}", e))
    })?;
    if millis == 0 {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "PAYSTACK_TIMEOUT_MS must be greater than zero"
        )));
    }
    if millis > MAX_PAYSTACK_TIMEOUT_MS {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "PAYSTACK_TIMEOUT_MS must not exceed {} (got {})",
            MAX_PAYSTACK_TIMEOUT_MS,
            millis
        )));
    }
    Ok(Duration::from_millis(millis))
}

fn parse_bank_codes(raw: &str) -> Result<Vec<BankCode>, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "VERIFY_BANK_CODES must list at least one bank code"
        )));
    }
    BankCode::parse_list(raw)
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("VERIFY_BANK_CODES is invalid: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_must_be_positive_integer() {
        assert_eq!(parse_timeout("2500").unwrap(), Duration::from_millis(2500));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("five").is_err());
    }

    #[test]
    fn timeout_is_capped_at_five_seconds() {
        assert_eq!(parse_timeout("5000").unwrap(), Duration::from_secs(5));
        assert!(matches!(
            parse_timeout("5001"),
            Err(AppError::ConfigError(_))
        ));
        assert!(parse_timeout("60000").is_err());
    }

    #[test]
    fn bank_code_override_preserves_order() {
        let codes = parse_bank_codes("070,214").unwrap();
        let codes: Vec<&str> = codes.iter().map(BankCode::as_str).collect();
        assert_eq!(codes, vec!["070", "214"]);
    }

    #[test]
    fn empty_bank_code_override_is_rejected() {
        assert!(matches!(
            parse_bank_codes("  "),
            Err(AppError::ConfigError(_))
        ));
        assert!(parse_bank_codes("058,,011").is_err());
    }

    #[test]
    fn paystack_defaults_match_provider() {
        let config = PaystackConfig::default();
        assert_eq!(config.api_base_url, "https://api.paystack.co");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.secret_key.is_none());
    }
}
