use std::time::Duration;

pub struct HttpPaymentVerifierConfig {
    pub gateway_url: String,
    pub secret_key: String,
    pub timeout: Duration,
}
