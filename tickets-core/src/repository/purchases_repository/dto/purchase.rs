use crate::repository::purchases_repository::entity::PurchaseFindEntity;
use bson::oid::ObjectId;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Purchase {
    pub id: ObjectId,

    pub payment_reference: String,
    pub event_id: ObjectId,
    pub buyer_id: Uuid,
    pub quantity: u32,

    pub amount: Decimal,
    pub currency: String,

    pub created_at: OffsetDateTime,
}

impl From<PurchaseFindEntity> for Purchase {
    fn from(value: PurchaseFindEntity) -> Self {
        Self {
            id: value._id,
            payment_reference: value.payment_reference,
            event_id: value.event_id,
            buyer_id: value.buyer_id.into(),
            quantity: value.quantity,
            amount: value.amount,
            currency: value.currency,
            created_at: value.created_at.into(),
        }
    }
}
