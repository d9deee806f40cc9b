use crate::repository::Ticket;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionStatus {
    /// First redemption, ticket is now marked as used
    Valid,
    AlreadyUsed,
    NotFound,
    /// Transient failure, redemption can be retried
    Error,
}

#[derive(Debug, Serialize)]
pub struct Redemption {
    pub status: RedemptionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<RedeemedTicket>,
}

#[derive(Debug, Serialize)]
pub struct RedeemedTicket {
    pub event_id: String,
    pub attendee_name: String,
    pub email: String,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub used_at: Option<OffsetDateTime>,
}

impl Redemption {
    pub fn valid(ticket: Ticket) -> Self {
        Self::with_ticket(RedemptionStatus::Valid, ticket)
    }

    pub fn already_used(ticket: Ticket) -> Self {
        Self::with_ticket(RedemptionStatus::AlreadyUsed, ticket)
    }

    pub fn not_found() -> Self {
        Self {
            status: RedemptionStatus::NotFound,
            ticket: None,
        }
    }

    pub fn error() -> Self {
        Self {
            status: RedemptionStatus::Error,
            ticket: None,
        }
    }

    fn with_ticket(status: RedemptionStatus, ticket: Ticket) -> Self {
        Self {
            status,
            ticket: Some(RedeemedTicket {
                event_id: ticket.event_id.to_hex(),
                attendee_name: ticket.attendee_name,
                email: ticket.email,
                used_at: ticket.used_at,
            }),
        }
    }
}
