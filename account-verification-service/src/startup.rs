//! Application startup and lifecycle management.

use crate::config::VerificationConfig;
use crate::handlers;
use crate::models::{FunctionVariables, PAYSTACK_SECRET_KEY};
use crate::services::{init_metrics, AccountResolver, AccountVerifier, PaystackClient};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: VerificationConfig,
    pub verifier: AccountVerifier,
    /// Variables handed to every invocation; built once from configuration.
    pub variables: FunctionVariables,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: VerificationConfig) -> Result<Self, AppError> {
        init_metrics();

        if config.resolution.bank_codes.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "at least one bank code candidate is required"
            )));
        }

        let resolver: Arc<dyn AccountResolver> =
            Arc::new(PaystackClient::new(config.paystack.clone()));
        let verifier = AccountVerifier::new(resolver, config.resolution.bank_codes.clone());

        let mut variables = FunctionVariables::new();
        match config.paystack.secret_key.clone() {
            Some(secret) => {
                variables.insert(PAYSTACK_SECRET_KEY, secret);
                tracing::info!(
                    candidates = config.resolution.bank_codes.len(),
                    "Paystack client initialized"
                );
            }
            None => tracing::warn!(
                "{} not configured - every verification will fail with a configuration error",
                PAYSTACK_SECRET_KEY
            ),
        }

        let state = AppState {
            config: config.clone(),
            verifier,
            variables,
        };

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Account verification service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

pub fn router(state: AppState) -> Router {
    // Last layer added runs first: the request id must exist before the
    // trace span is built.
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/verify-account", post(handlers::verify::verify_account))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(http_request_span))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

fn http_request_span(request: &axum::http::Request<axum::body::Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PaystackConfig, ResolutionConfig};
    use axum::body::Body;
    use std::fmt;
    use std::sync::Mutex;
    use tower::ServiceExt;
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::util::SubscriberInitExt;

    /// Collects the `request_id` field of every `http_request` span.
    #[derive(Clone, Default)]
    struct RequestIdSpans(Arc<Mutex<Vec<String>>>);

    struct RequestIdVisitor<'a>(&'a Mutex<Vec<String>>);

    impl Visit for RequestIdVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "request_id" {
                self.0.lock().unwrap().push(format!("{:?}", value));
            }
        }
    }

    impl<S: Subscriber> Layer<S> for RequestIdSpans {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            if attrs.metadata().name() == "http_request" {
                attrs.record(&mut RequestIdVisitor(&self.0));
            }
        }
    }

    fn test_state() -> AppState {
        let config = VerificationConfig {
            common: service_core::config::Config::default(),
            paystack: PaystackConfig::default(),
            resolution: ResolutionConfig::default(),
            service_name: "account-verification-service".to_string(),
        };
        let resolver: Arc<dyn AccountResolver> =
            Arc::new(PaystackClient::new(config.paystack.clone()));
        AppState {
            verifier: AccountVerifier::new(resolver, config.resolution.bank_codes.clone()),
            config,
            variables: FunctionVariables::new(),
        }
    }

    #[tokio::test]
    async fn trace_span_carries_generated_request_id() {
        let spans = RequestIdSpans::default();
        let _guard = tracing_subscriber::registry()
            .with(spans.clone())
            .set_default();

        let response = router(test_state())
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let header_id = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        let recorded = spans.0.lock().unwrap().clone();

        assert_eq!(recorded, vec![header_id]);
    }
}
