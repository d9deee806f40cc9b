use bson::oid::ObjectId;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub payment_reference: String,
    pub event_id: ObjectId,
    pub buyer_id: Uuid,

    pub amount: Decimal,
    pub currency: String,

    pub created_at: OffsetDateTime,

    /// One entry per issued ticket, in purchase order
    pub tickets: Vec<NewTicket>,
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub code: String,
    pub attendee_name: String,
    pub email: String,
}
