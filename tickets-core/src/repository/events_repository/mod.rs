mod dto;
mod entity;
mod events_repository;
mod events_repository_impl;

pub use dto::Event;
pub use events_repository::*;
pub use events_repository_impl::*;
