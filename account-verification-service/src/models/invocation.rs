//! Function-style invocation contract: an explicit variable map and a raw
//! payload in, one JSON body with a status code out.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;

use crate::dtos::VerifyAccountResponse;

/// Variable holding the Paystack API key.
pub const PAYSTACK_SECRET_KEY: &str = "PAYSTACK_SECRET_KEY";

/// Execution-context variables. Values stay wrapped in [`Secret`] so they
/// never show up in `Debug` output or logs.
#[derive(Clone, Debug, Default)]
pub struct FunctionVariables {
    values: HashMap<String, Secret<String>>,
}

impl FunctionVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: Secret<String>) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Secret<String>) {
        self.values.insert(name.into(), value);
    }

    /// Returns the variable, treating an empty value as unset.
    pub fn get(&self, name: &str) -> Option<&Secret<String>> {
        self.values
            .get(name)
            .filter(|value| !value.expose_secret().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Invocation {
    pub variables: FunctionVariables,
    pub payload: String,
}

impl Invocation {
    pub fn new(variables: FunctionVariables, payload: impl Into<String>) -> Self {
        Self {
            variables,
            payload: payload.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub status: StatusCode,
    pub body: VerifyAccountResponse,
}

impl FunctionResponse {
    /// Response with the default status (200).
    pub fn ok(body: VerifyAccountResponse) -> Self {
        Self::with_status(body, StatusCode::OK)
    }

    pub fn with_status(body: VerifyAccountResponse, status: StatusCode) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
