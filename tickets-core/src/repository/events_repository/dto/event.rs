use crate::repository::events_repository::entity::EventFindEntity;
use bson::oid::ObjectId;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct Event {
    pub id: ObjectId,

    pub total_tickets: i64,
    pub price: Decimal,

    pub organizer_id: String,
}

impl From<EventFindEntity> for Event {
    fn from(value: EventFindEntity) -> Self {
        Self {
            id: value._id,
            total_tickets: value.total_tickets,
            price: value.price,
            organizer_id: value.organizer_id,
        }
    }
}
