mod dto;
mod redemption_service;
mod redemption_service_impl;

pub use dto::RedemptionServiceConfig;
pub use redemption_service::*;
pub use redemption_service_impl::*;
