use super::{entity::EventFindEntity, Event, EventsRepository};
use crate::repository::{self, create_collection_if_missing};
use axum::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::Database;

pub const EVENTS: &str = "events";

pub struct EventsRepositoryImpl {
    database: Database,
}

impl EventsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        create_collection_if_missing(&database, EVENTS).await?;

        Ok(Self { database })
    }
}

#[async_trait]
impl EventsRepository for EventsRepositoryImpl {
    async fn find(&self, id: ObjectId) -> Result<Option<Event>, repository::Error> {
        let event = self
            .database
            .collection::<EventFindEntity>(EVENTS)
            .find_one(doc! {
                "_id": id,
            })
            .await?
            .map(Event::from);

        Ok(event)
    }
}
