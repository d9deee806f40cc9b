mod gateway_verify_response;
mod http_payment_verifier_config;
mod verified_payment;

pub use gateway_verify_response::*;
pub use http_payment_verifier_config::*;
pub use verified_payment::*;
