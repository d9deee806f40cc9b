use super::Event;
use crate::repository;
use axum::async_trait;
use bson::oid::ObjectId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsRepository: Send + Sync {
    ///
    /// Finds event with its current inventory.
    /// Value is always read from the database, never cached.
    ///
    async fn find(&self, id: ObjectId) -> Result<Option<Event>, repository::Error>;
}
