use axum::{body::Bytes, extract::State};

use crate::models::{FunctionResponse, Invocation};
use crate::startup::AppState;

/// Resolve the holder name for an account number.
///
/// The body is handed to the verifier as a raw payload so that malformed
/// JSON gets the same 400 body as a bad account number instead of axum's
/// own rejection.
pub async fn verify_account(State(state): State<AppState>, body: Bytes) -> FunctionResponse {
    let payload = String::from_utf8_lossy(&body).into_owned();
    let invocation = Invocation::new(state.variables.clone(), payload);

    state.verifier.handle(&invocation).await
}
