use super::{Error, VerifiedPayment};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    ///
    /// Asks the payment gateway about the payment.
    /// Unknown reference is reported as not confirmed payment, not as an error.
    ///
    /// ### Errors
    /// - [Error] when gateway could not be reached or answered unexpectedly.
    ///   It is safe to retry.
    ///
    async fn verify(&self, reference: &str) -> Result<VerifiedPayment, Error>;
}
