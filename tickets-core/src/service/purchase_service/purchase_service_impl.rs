use super::{ticket_code::generate_ticket_code, PurchaseService, PurchaseServiceConfig};
use crate::{
    dto::{input, output},
    error::Error,
    repository::{
        self, EventsRepository, NewPurchase, NewTicket, Purchase, PurchasesRepository,
        TicketsRepository, UnfulfilledPayment, UnfulfilledReason,
    },
    service::payment_verifier::{PaymentVerifier, VerifiedPayment},
};
use axum::async_trait;
use bson::oid::ObjectId;
use rust_decimal::Decimal;
use std::sync::Arc;
use time::OffsetDateTime;

pub struct PurchaseServiceImpl {
    config: PurchaseServiceConfig,
    payment_verifier: Arc<dyn PaymentVerifier>,
    events_repository: Arc<dyn EventsRepository>,
    purchases_repository: Arc<dyn PurchasesRepository>,
    tickets_repository: Arc<dyn TicketsRepository>,
}

///
/// Purchase after input validation
///
struct ValidPurchase {
    payment_reference: String,
    event_id: ObjectId,
    quantity: u32,
    buyer: input::Buyer,
}

impl PurchaseServiceImpl {
    pub fn new(
        config: PurchaseServiceConfig,
        payment_verifier: Arc<dyn PaymentVerifier>,
        events_repository: Arc<dyn EventsRepository>,
        purchases_repository: Arc<dyn PurchasesRepository>,
        tickets_repository: Arc<dyn TicketsRepository>,
    ) -> Self {
        Self {
            config,
            payment_verifier,
            events_repository,
            purchases_repository,
            tickets_repository,
        }
    }

    fn validate(&self, purchase: input::Purchase) -> Result<ValidPurchase, Error> {
        if purchase.payment_reference.trim().is_empty() {
            return Err(Error::Validation("payment_reference is blank"));
        }
        if purchase.quantity == 0 {
            return Err(Error::Validation("quantity must be at least 1"));
        }
        if purchase.quantity > self.config.max_quantity {
            return Err(Error::Validation("quantity above the limit"));
        }
        if purchase.buyer.name.trim().is_empty() {
            return Err(Error::Validation("buyer name is blank"));
        }
        if purchase.buyer.email.trim().is_empty() {
            return Err(Error::Validation("buyer email is blank"));
        }

        let event_id = ObjectId::parse_str(&purchase.event_id)
            .map_err(|_| Error::Validation("invalid event_id"))?;

        Ok(ValidPurchase {
            payment_reference: purchase.payment_reference,
            event_id,
            quantity: purchase.quantity,
            buyer: purchase.buyer,
        })
    }

    fn validate_payment(&self, payment: &VerifiedPayment) -> Result<(), Error> {
        if !payment.confirmed {
            return Err(Error::PaymentNotConfirmed(
                "payment was not confirmed by the gateway",
            ));
        }
        if payment.currency != self.config.currency {
            tracing::warn!(currency = %payment.currency, "unsupported payment currency");
            return Err(Error::PaymentNotConfirmed("payment currency not supported"));
        }

        Ok(())
    }

    async fn verify_and_issue(&self, purchase: &ValidPurchase) -> Result<output::Purchase, Error> {
        let payment = self
            .payment_verifier
            .verify(&purchase.payment_reference)
            .await?;
        self.validate_payment(&payment)?;
        tracing::info!(amount = %payment.amount, "payment confirmed");

        for attempt in 1..=self.config.max_attempts {
            // Event is read before the purchase record. Purchase that commits
            // in between is then seen either here or as a failed compare-and-swap.
            let event = self
                .events_repository
                .find(purchase.event_id)
                .await?
                .ok_or(Error::EventNotFound)?;

            if let Some(prior) = self
                .purchases_repository
                .find_by_payment_reference(&purchase.payment_reference)
                .await?
            {
                return self.replay(purchase, prior).await;
            }

            let price = event.price * Decimal::from(purchase.quantity);
            if payment.amount < price {
                tracing::warn!(amount = %payment.amount, %price, "payment amount too low");
                self.flag_unfulfilled(purchase, &payment, UnfulfilledReason::AmountTooLow)
                    .await?;
                return Err(Error::PaymentNotConfirmed(
                    "payment amount lower than tickets price",
                ));
            }

            if event.total_tickets < i64::from(purchase.quantity) {
                self.flag_unfulfilled(
                    purchase,
                    &payment,
                    UnfulfilledReason::InsufficientInventory,
                )
                .await?;
                return Err(Error::InsufficientInventory {
                    requested: purchase.quantity,
                    available: event.total_tickets.max(0),
                });
            }

            let new_purchase = Self::new_purchase(purchase, &payment);
            match self
                .purchases_repository
                .insert(new_purchase, event.total_tickets)
                .await
            {
                Ok(inserted_purchase) => {
                    tracing::info!(
                        id = %inserted_purchase.purchase.id,
                        attempt,
                        "issued tickets"
                    );

                    return Ok(output::Purchase {
                        payment_reference: inserted_purchase.purchase.payment_reference,
                        event_id: inserted_purchase.purchase.event_id.to_hex(),
                        tickets: inserted_purchase
                            .tickets
                            .into_iter()
                            .map(output::Ticket::from)
                            .collect(),
                        replayed: false,
                    });
                }
                Err(repository::Error::NoDocumentUpdated) => {
                    tracing::warn!(attempt, "inventory changed concurrently");
                }
                Err(repository::Error::InsertUniqueViolation) => {
                    tracing::warn!(attempt, "payment reference consumed concurrently");
                }
                Err(repository::Error::TransactionConflict(err)) => {
                    tracing::warn!(attempt, %err, "transaction conflict");
                }
                Err(repository::Error::TicketCodeCollision) => {
                    tracing::error!("generated ticket code already exists");
                    return Err(Error::TicketCodeCollision);
                }
                Err(err) => return Err(Error::Database(err)),
            }

            if attempt < self.config.max_attempts {
                tokio::time::sleep(self.config.retry_interval).await;
            }
        }

        tracing::warn!("purchase attempts exhausted");
        Err(Error::Conflict)
    }

    ///
    /// Returns tickets of the purchase that already consumed the payment reference
    ///
    async fn replay(
        &self,
        purchase: &ValidPurchase,
        prior: Purchase,
    ) -> Result<output::Purchase, Error> {
        let same_purchase = prior.event_id == purchase.event_id
            && prior.buyer_id == purchase.buyer.id
            && prior.quantity == purchase.quantity;
        if !same_purchase {
            tracing::warn!(prior_id = %prior.id, "payment reference used by different purchase");
            return Err(Error::PaymentReferenceReused);
        }

        let tickets = self
            .tickets_repository
            .find_many_by_payment_reference(&prior.payment_reference)
            .await?;
        tracing::info!(prior_id = %prior.id, count = tickets.len(), "replayed purchase");

        Ok(output::Purchase {
            payment_reference: prior.payment_reference,
            event_id: prior.event_id.to_hex(),
            tickets: tickets.into_iter().map(output::Ticket::from).collect(),
            replayed: true,
        })
    }

    async fn flag_unfulfilled(
        &self,
        purchase: &ValidPurchase,
        payment: &VerifiedPayment,
        reason: UnfulfilledReason,
    ) -> Result<(), Error> {
        tracing::warn!(reason = reason.as_ref(), "flagging unfulfilled payment");

        self.purchases_repository
            .flag_unfulfilled(UnfulfilledPayment {
                payment_reference: purchase.payment_reference.clone(),
                event_id: purchase.event_id,
                buyer_id: purchase.buyer.id,
                quantity: purchase.quantity,
                amount: payment.amount,
                currency: payment.currency.clone(),
                reason,
            })
            .await?;

        Ok(())
    }

    fn new_purchase(purchase: &ValidPurchase, payment: &VerifiedPayment) -> NewPurchase {
        let created_at = OffsetDateTime::now_utc();
        let tickets = (0..purchase.quantity)
            .map(|index| NewTicket {
                code: generate_ticket_code(
                    purchase.event_id,
                    purchase.buyer.id,
                    created_at,
                    index,
                ),
                attendee_name: purchase.buyer.name.clone(),
                email: purchase.buyer.email.clone(),
            })
            .collect();

        NewPurchase {
            payment_reference: purchase.payment_reference.clone(),
            event_id: purchase.event_id,
            buyer_id: purchase.buyer.id,
            amount: payment.amount,
            currency: payment.currency.clone(),
            created_at,
            tickets,
        }
    }
}

#[async_trait]
impl PurchaseService for PurchaseServiceImpl {
    #[tracing::instrument(
        name = "Purchase",
        skip_all,
        fields(
            payment_reference = %purchase.payment_reference,
            event_id = %purchase.event_id,
            quantity = purchase.quantity,
        )
    )]
    async fn purchase(&self, purchase: input::Purchase) -> Result<output::Purchase, Error> {
        tracing::info!("purchasing tickets");
        tracing::trace!(?purchase);

        let purchase = self.validate(purchase)?;

        // Dropping the future on timeout aborts the open transaction,
        // so nothing is partially applied
        tokio::time::timeout(self.config.timeout, self.verify_and_issue(&purchase))
            .await
            .map_err(|_| {
                tracing::warn!("purchase timed out");
                Error::Timeout
            })?
    }
}
