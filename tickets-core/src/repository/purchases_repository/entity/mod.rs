mod purchase_find_entity;
mod purchase_insert_entity;

pub use purchase_find_entity::*;
pub use purchase_insert_entity::*;
