mod inserted_purchase;
mod new_purchase;
mod purchase;
mod unfulfilled_payment;

pub use inserted_purchase::*;
pub use new_purchase::*;
pub use purchase::*;
pub use unfulfilled_payment::*;
