mod dto;
mod entity;
mod purchases_repository;
mod purchases_repository_impl;

pub use dto::*;
pub use purchases_repository::*;
pub use purchases_repository_impl::*;
