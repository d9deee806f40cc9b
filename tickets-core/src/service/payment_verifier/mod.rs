mod dto;
mod error;
mod http_payment_verifier;
mod payment_verifier;

pub use dto::{HttpPaymentVerifierConfig, VerifiedPayment};
pub use error::*;
pub use http_payment_verifier::*;
pub use payment_verifier::*;
