use std::time::Duration;

pub struct RedemptionServiceConfig {
    /// Upper bound for every single database call made during redemption
    pub timeout: Duration,
}
