use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseService: Send + Sync {
    ///
    /// Turns verified payment into tickets.
    /// Inventory decrement and ticket creation are applied atomically.
    /// Calling it again with the same payment reference returns already issued tickets.
    ///
    /// ### Returns
    /// [output::Purchase] with issued tickets
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - quantity is 0 or above the limit
    ///     - event_id is not valid
    ///     - payment reference or buyer details are blank
    /// - [Error::PaymentNotConfirmed] when
    ///     - gateway did not confirm the payment
    ///     - payment currency is not supported
    ///     - paid amount is lower than tickets price
    /// - [Error::EventNotFound] when event does not exist
    /// - [Error::InsufficientInventory] when there are fewer tickets left than requested
    /// - [Error::PaymentReferenceReused] when payment reference was already used
    ///   for a purchase with different event, buyer or quantity
    /// - [Error::Conflict] when inventory kept changing concurrently
    /// - [Error::Timeout] when purchase did not complete in time
    ///
    async fn purchase(&self, purchase: input::Purchase) -> Result<output::Purchase, Error>;
}
