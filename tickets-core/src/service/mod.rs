pub mod payment_verifier;
pub mod purchase_service;
pub mod redemption_service;
