use std::time::Duration;

pub struct PurchaseServiceConfig {
    /// Currency in which events are priced. Payments in other currencies are rejected
    pub currency: String,

    pub max_quantity: u32,

    /// Number of attempts to apply the purchase when inventory changes concurrently.
    /// Must be at least 1
    pub max_attempts: u32,
    pub retry_interval: Duration,

    /// Upper bound for the whole purchase including payment verification
    pub timeout: Duration,
}
