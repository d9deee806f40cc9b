use bson::{oid::ObjectId, DateTime, Uuid};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct PurchaseFindEntity {
    pub _id: ObjectId,

    pub payment_reference: String,
    pub event_id: ObjectId,
    pub buyer_id: Uuid,
    pub quantity: u32,

    pub amount: Decimal,
    pub currency: String,

    pub created_at: DateTime,
}
