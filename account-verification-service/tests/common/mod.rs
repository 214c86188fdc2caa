#![allow(dead_code)]

use account_verification_service::config::{PaystackConfig, ResolutionConfig, VerificationConfig};
use account_verification_service::models::BankCode;
use account_verification_service::Application;
use secrecy::Secret;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_SECRET: &str = "sk_test_secret";
pub const ACCOUNT_NUMBER: &str = "1234567890";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub paystack: MockServer,
    pub client: reqwest::Client,
}

pub struct TestOptions {
    pub secret: Option<&'static str>,
    pub bank_codes: Option<&'static str>,
    pub timeout: Duration,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            secret: Some(TEST_SECRET),
            bank_codes: None,
            timeout: Duration::from_secs(5),
        }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(TestOptions::default()).await
    }

    pub async fn spawn_with(options: TestOptions) -> Self {
        let paystack = MockServer::start().await;

        let resolution = match options.bank_codes {
            Some(raw) => ResolutionConfig {
                bank_codes: BankCode::parse_list(raw).expect("invalid test bank codes"),
            },
            None => ResolutionConfig::default(),
        };

        let config = VerificationConfig {
            common: CoreConfig {
                port: 0, // Random port
                ..CoreConfig::default()
            },
            paystack: PaystackConfig {
                secret_key: options.secret.map(|s| Secret::new(s.to_string())),
                api_base_url: paystack.uri(),
                request_timeout: options.timeout,
            },
            resolution,
            service_name: "account-verification-service".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            paystack,
            client,
        }
    }

    pub async fn verify(&self, body: impl Into<String>) -> (u16, Value) {
        let response = self
            .client
            .post(format!("{}/verify-account", self.address))
            .header("Content-Type", "application/json")
            .body(body.into())
            .send()
            .await
            .expect("Failed to execute request");

        let status = response.status().as_u16();
        let body = response.json().await.expect("Failed to parse JSON");
        (status, body)
    }

    /// Bank codes Paystack was called with, in call order.
    pub async fn probed_bank_codes(&self) -> Vec<String> {
        self.paystack
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| {
                request
                    .url
                    .query_pairs()
                    .find(|(key, _)| key == "bank_code")
                    .map(|(_, value)| value.into_owned())
            })
            .collect()
    }
}

pub fn resolved_body(account_name: &str) -> Value {
    json!({
        "status": true,
        "message": "Account number resolved",
        "data": {
            "account_number": ACCOUNT_NUMBER,
            "account_name": account_name,
            "bank_id": 9
        }
    })
}

pub fn unresolved_body() -> Value {
    json!({
        "status": false,
        "message": "Could not resolve account name. Check parameters or try again."
    })
}

/// Mounts a Paystack response for one bank code.
pub async fn mount_bank(server: &MockServer, bank_code: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/bank/resolve"))
        .and(query_param("bank_code", bank_code))
        .respond_with(response)
        .mount(server)
        .await;
}
