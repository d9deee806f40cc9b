use crate::repository::PaymentStatus;
use bson::{oid::ObjectId, DateTime, Uuid};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct TicketFindEntity {
    pub _id: ObjectId,
    pub event_id: ObjectId,

    pub payment_reference: String,
    pub buyer_id: Uuid,
    pub index: u32,

    pub attendee_name: String,
    pub email: String,

    pub code: String,
    pub payment_status: PaymentStatus,

    pub used: bool,
    pub used_at: Option<DateTime>,
    pub redemption_id: Option<Uuid>,

    pub created_at: DateTime,
}
