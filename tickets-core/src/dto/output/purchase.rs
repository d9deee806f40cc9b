use crate::repository;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct Purchase {
    pub payment_reference: String,
    pub event_id: String,
    pub tickets: Vec<Ticket>,

    /// Tickets had been issued by an earlier call with the same payment reference
    #[serde(skip)]
    pub replayed: bool,
}

#[derive(Debug, Serialize)]
pub struct Ticket {
    pub id: String,
    pub code: String,
    pub attendee_name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<repository::Ticket> for Ticket {
    fn from(value: repository::Ticket) -> Self {
        Self {
            id: value.id.to_hex(),
            code: value.code,
            attendee_name: value.attendee_name,
            email: value.email,
            created_at: value.created_at,
        }
    }
}
