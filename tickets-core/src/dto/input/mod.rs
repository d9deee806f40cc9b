mod purchase;
mod redemption;

pub use purchase::*;
pub use redemption::*;
