mod purchase_service_config;

pub use purchase_service_config::*;
