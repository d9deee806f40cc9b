use super::Purchase;
use crate::repository::Ticket;

#[derive(Debug, Clone)]
pub struct InsertedPurchase {
    pub purchase: Purchase,
    pub tickets: Vec<Ticket>,
}
