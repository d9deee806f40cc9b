use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedemptionService: Send + Sync {
    ///
    /// Marks ticket as used. Out of any number of concurrent redemptions
    /// of the same ticket exactly one gets [output::RedemptionStatus::Valid]
    ///
    /// ### Returns
    /// - [output::RedemptionStatus::Valid] when this call used the ticket
    /// - [output::RedemptionStatus::AlreadyUsed] when ticket was used before
    /// - [output::RedemptionStatus::NotFound] when there is no paid ticket with the code
    ///
    /// ### Errors
    /// - [Error::Database] when outcome of the redemption could not be determined
    /// - [Error::Timeout] when database did not respond in time
    ///
    async fn redeem(&self, redemption: input::Redemption) -> Result<output::Redemption, Error>;
}
