mod dto;
mod purchase_service;
mod purchase_service_impl;
mod ticket_code;

pub use dto::PurchaseServiceConfig;
pub use purchase_service::*;
pub use purchase_service_impl::*;
