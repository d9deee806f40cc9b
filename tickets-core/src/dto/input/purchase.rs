use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct Purchase {
    ///
    /// Reference of the payment in the payment gateway.
    /// Single reference can be turned into tickets only once.
    ///
    pub payment_reference: String,
    pub event_id: String,
    pub quantity: u32,
    pub buyer: Buyer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Buyer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
