use bson::oid::ObjectId;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct EventFindEntity {
    pub _id: ObjectId,

    pub total_tickets: i64,
    pub price: Decimal,

    pub organizer_id: String,
}
