use bson::{oid::ObjectId, DateTime, Uuid};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
pub struct PurchaseInsertEntity<'a> {
    pub payment_reference: &'a str,
    pub event_id: ObjectId,
    pub buyer_id: Uuid,
    pub quantity: u32,

    pub amount: Decimal,
    pub currency: &'a str,

    pub created_at: DateTime,
}
