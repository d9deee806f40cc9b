use super::Ticket;
use crate::repository;
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsRepository: Send + Sync {
    ///
    /// Finds ticket with the code. Only tickets with
    /// payment_status = paid are returned
    ///
    async fn find_paid(&self, code: &str) -> Result<Option<Ticket>, repository::Error>;

    async fn find(&self, id: ObjectId) -> Result<Option<Ticket>, repository::Error>;

    ///
    /// Finds all tickets issued for the payment.
    /// Tickets are sorted ascending by their index in the purchase
    ///
    async fn find_many_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> Result<Vec<Ticket>, repository::Error>;

    ///
    /// Flips used from false to true in a single conditional write.
    /// Repeating it with the same redemption_id succeeds again
    ///
    /// ### Errors
    /// - [repository::Error::NoDocumentUpdated] when
    ///     - ticket does not exist
    ///     - ticket had already been used by another redemption
    ///
    async fn update_used(
        &self,
        id: ObjectId,
        used_at: OffsetDateTime,
        redemption_id: Uuid,
    ) -> Result<(), repository::Error>;
}
