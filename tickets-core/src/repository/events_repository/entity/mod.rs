mod event_find_entity;

pub use event_find_entity::*;
