mod redemption_service_config;

pub use redemption_service_config::*;
