pub mod error;
pub mod metrics;
pub mod paystack;
pub mod resolver;
pub mod verifier;

pub use error::VerificationError;
pub use metrics::{get_metrics, init_metrics};
pub use paystack::PaystackClient;
pub use resolver::{AccountResolver, ResolveError};
pub use verifier::AccountVerifier;
