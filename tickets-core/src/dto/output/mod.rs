mod error_response;
mod purchase;
mod redemption;

pub use error_response::*;
pub use purchase::*;
pub use redemption::*;
