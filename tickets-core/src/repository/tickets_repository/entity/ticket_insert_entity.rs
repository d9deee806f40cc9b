use crate::repository::PaymentStatus;
use bson::{oid::ObjectId, DateTime, Uuid};
use serde::Serialize;

#[derive(Serialize)]
pub struct TicketInsertEntity<'a> {
    pub event_id: ObjectId,

    pub payment_reference: &'a str,
    pub buyer_id: Uuid,
    pub index: u32,

    pub attendee_name: &'a str,
    pub email: &'a str,

    pub code: &'a str,
    pub payment_status: PaymentStatus,

    pub used: bool,
    pub used_at: Option<DateTime>,
    pub redemption_id: Option<Uuid>,

    pub created_at: DateTime,
}
