use super::{RedemptionService, RedemptionServiceConfig};
use crate::{
    dto::{input, output},
    error::Error,
    repository::{self, Ticket, TicketsRepository},
};
use axum::async_trait;
use std::{future::Future, sync::Arc};
use time::OffsetDateTime;
use uuid::Uuid;

/// Read and write rounds made before uncertain redemption is reported as error
const RESOLVE_ATTEMPTS: u32 = 3;

pub struct RedemptionServiceImpl {
    config: RedemptionServiceConfig,
    tickets_repository: Arc<dyn TicketsRepository>,
}

impl RedemptionServiceImpl {
    pub fn new(
        config: RedemptionServiceConfig,
        tickets_repository: Arc<dyn TicketsRepository>,
    ) -> Self {
        Self {
            config,
            tickets_repository,
        }
    }

    async fn with_timeout<T, F>(&self, future: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, repository::Error>>,
    {
        match tokio::time::timeout(self.config.timeout, future).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(Error::Timeout),
        }
    }

    async fn update_used(
        &self,
        ticket: &Ticket,
        used_at: OffsetDateTime,
        redemption_id: Uuid,
    ) -> Result<(), Error> {
        self.with_timeout(
            self.tickets_repository
                .update_used(ticket.id, used_at, redemption_id),
        )
        .await
    }

    ///
    /// Resolves redemption whose conditional write failed without a definite answer.
    ///
    /// Ticket is read again and the redemption_id stored in it tells who used it.
    /// While it's still unused the write is repeated with the same redemption_id,
    /// so a delayed first write and the repeated one can't both count
    ///
    async fn resolve_uncertain(
        &self,
        ticket: Ticket,
        used_at: OffsetDateTime,
        redemption_id: Uuid,
        mut cause: Error,
    ) -> Result<output::Redemption, Error> {
        for attempt in 1..=RESOLVE_ATTEMPTS {
            tracing::warn!(attempt, err = %cause, "redemption outcome uncertain, reading ticket again");

            let current = match self.with_timeout(self.tickets_repository.find(ticket.id)).await {
                Ok(Some(current)) => current,
                Ok(None) => {
                    tracing::error!("ticket disappeared during redemption");
                    return Err(cause);
                }
                Err(err) => {
                    tracing::error!(%err, "failed to read ticket again");
                    return Err(err);
                }
            };

            if current.used {
                return match current.redemption_id == Some(redemption_id) {
                    true => {
                        tracing::info!("ticket used by this redemption");
                        Ok(output::Redemption::valid(current))
                    }
                    false => {
                        tracing::info!("ticket used by another redemption");
                        Ok(output::Redemption::already_used(current))
                    }
                };
            }

            match self.update_used(&current, used_at, redemption_id).await {
                Ok(()) => {
                    tracing::info!("ticket redeemed on repeated write");
                    let current = Self::mark_used(current, used_at, redemption_id);
                    return Ok(output::Redemption::valid(current));
                }
                Err(Error::Database(repository::Error::NoDocumentUpdated)) => {
                    tracing::info!("ticket used concurrently");
                    return Ok(self.already_used(current).await);
                }
                Err(err) => cause = err,
            }
        }

        tracing::error!(err = %cause, "redemption outcome still uncertain");
        Err(cause)
    }

    ///
    /// Answer for ticket that lost the conditional write.
    /// Ticket is read again to show when it was used
    ///
    async fn already_used(&self, stale: Ticket) -> output::Redemption {
        match self.with_timeout(self.tickets_repository.find(stale.id)).await {
            Ok(Some(current)) if current.used => output::Redemption::already_used(current),
            Ok(_) => output::Redemption::already_used(stale),
            Err(err) => {
                tracing::warn!(%err, "failed to read used ticket");
                output::Redemption::already_used(stale)
            }
        }
    }

    fn mark_used(mut ticket: Ticket, used_at: OffsetDateTime, redemption_id: Uuid) -> Ticket {
        ticket.used = true;
        ticket.used_at = Some(used_at);
        ticket.redemption_id = Some(redemption_id);

        ticket
    }
}

#[async_trait]
impl RedemptionService for RedemptionServiceImpl {
    #[tracing::instrument(name = "Redemption", skip_all, fields(ticket_id))]
    async fn redeem(&self, redemption: input::Redemption) -> Result<output::Redemption, Error> {
        let code = redemption.code.trim();
        if code.is_empty() {
            tracing::info!("blank ticket code");
            return Ok(output::Redemption::not_found());
        }

        let ticket = match self
            .with_timeout(self.tickets_repository.find_paid(code))
            .await?
        {
            Some(ticket) => ticket,
            None => {
                tracing::info!("ticket not found");
                return Ok(output::Redemption::not_found());
            }
        };
        tracing::Span::current().record("ticket_id", tracing::field::display(ticket.id));

        if ticket.used {
            tracing::info!("ticket already used");
            return Ok(output::Redemption::already_used(ticket));
        }

        let used_at = OffsetDateTime::now_utc();
        let redemption_id = Uuid::new_v4();

        match self.update_used(&ticket, used_at, redemption_id).await {
            Ok(()) => {
                tracing::info!("ticket redeemed");
                let ticket = Self::mark_used(ticket, used_at, redemption_id);
                Ok(output::Redemption::valid(ticket))
            }
            Err(Error::Database(repository::Error::NoDocumentUpdated)) => {
                tracing::info!("ticket used concurrently");
                Ok(self.already_used(ticket).await)
            }
            Err(err) => {
                self.resolve_uncertain(ticket, used_at, redemption_id, err)
                    .await
            }
        }
    }
}
