use super::PaymentStatus;
use crate::repository::tickets_repository::entity::TicketFindEntity;
use bson::oid::ObjectId;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: ObjectId,
    pub event_id: ObjectId,

    pub payment_reference: String,
    pub buyer_id: Uuid,
    pub index: u32,

    pub attendee_name: String,
    pub email: String,

    pub code: String,
    pub payment_status: PaymentStatus,

    pub used: bool,
    pub used_at: Option<OffsetDateTime>,
    pub redemption_id: Option<Uuid>,

    pub created_at: OffsetDateTime,
}

impl From<TicketFindEntity> for Ticket {
    fn from(value: TicketFindEntity) -> Self {
        Self {
            id: value._id,
            event_id: value.event_id,
            payment_reference: value.payment_reference,
            buyer_id: value.buyer_id.into(),
            index: value.index,
            attendee_name: value.attendee_name,
            email: value.email,
            code: value.code,
            payment_status: value.payment_status,
            used: value.used,
            used_at: value.used_at.map(OffsetDateTime::from),
            redemption_id: value.redemption_id.map(Uuid::from),
            created_at: value.created_at.into(),
        }
    }
}
