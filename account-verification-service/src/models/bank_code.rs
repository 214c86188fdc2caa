use std::fmt;
use thiserror::Error;

/// Codes tried, in order, when the caller gives no bank: GTBank, First Bank,
/// UBA, Zenith, Access, Fidelity, FCMB.
const DEFAULT_BANK_CODES: [&str; 7] = ["058", "011", "033", "057", "044", "070", "214"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankCodeError {
    #[error("bank code must not be empty")]
    Empty,

    #[error("bank code '{0}' must not contain whitespace")]
    Whitespace(String),
}

/// Opaque provider bank code. Only its position in the candidate list
/// carries meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BankCode(String);

impl BankCode {
    pub fn parse(raw: &str) -> Result<Self, BankCodeError> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(BankCodeError::Empty);
        }
        if code.chars().any(char::is_whitespace) {
            return Err(BankCodeError::Whitespace(code.to_string()));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses a comma separated list, keeping the first occurrence of any
    /// duplicate so probe order is stable.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, BankCodeError> {
        let mut codes: Vec<Self> = Vec::new();
        for part in raw.split(',') {
            let code = Self::parse(part)?;
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        Ok(codes)
    }
}

impl From<BankCode> for String {
    fn from(code: BankCode) -> Self {
        code.0
    }
}

impl fmt::Display for BankCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn default_bank_codes() -> Vec<BankCode> {
    DEFAULT_BANK_CODES
        .iter()
        .map(|code| BankCode(code.to_string()))
        .collect()
}
