use bson::oid::ObjectId;
use rust_decimal::Decimal;
use strum::AsRefStr;
use uuid::Uuid;

///
/// Payment that was confirmed by the gateway but did not result in tickets.
/// It is left for external reconciliation (refund or manual fulfilment).
///
#[derive(Debug, Clone)]
pub struct UnfulfilledPayment {
    pub payment_reference: String,
    pub event_id: ObjectId,
    pub buyer_id: Uuid,
    pub quantity: u32,

    pub amount: Decimal,
    pub currency: String,

    pub reason: UnfulfilledReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum UnfulfilledReason {
    InsufficientInventory,
    AmountTooLow,
}
