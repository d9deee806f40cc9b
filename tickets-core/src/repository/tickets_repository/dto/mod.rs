mod payment_status;
mod ticket;

pub use payment_status::*;
pub use ticket::*;
