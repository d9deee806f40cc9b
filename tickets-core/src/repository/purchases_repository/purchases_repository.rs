use super::{InsertedPurchase, NewPurchase, Purchase, UnfulfilledPayment};
use crate::repository::Error;
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchasesRepository: Send + Sync {
    ///
    /// Finds purchase that consumed the payment reference
    ///
    async fn find_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> Result<Option<Purchase>, Error>;

    ///
    /// In a single transaction:
    /// - decrements event total_tickets by the number of tickets,
    ///   but only if it still equals expected_total_tickets
    /// - inserts purchase record
    /// - inserts all tickets
    ///
    /// Either all of the writes are applied or none of them.
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when event does not exist
    ///   or its total_tickets changed since it was read
    /// - [Error::InsertUniqueViolation] when payment reference was already consumed
    /// - [Error::TicketCodeCollision] when any ticket code already exists
    /// - [Error::TransactionConflict] when transaction can be retried
    ///
    async fn insert(
        &self,
        purchase: NewPurchase,
        expected_total_tickets: i64,
    ) -> Result<InsertedPurchase, Error>;

    ///
    /// Records confirmed payment that could not be fulfilled.
    /// Flagging the same payment reference again updates the reason.
    ///
    async fn flag_unfulfilled(&self, payment: UnfulfilledPayment) -> Result<(), Error>;
}
