use super::{
    entity::{PurchaseFindEntity, PurchaseInsertEntity},
    InsertedPurchase, NewPurchase, Purchase, PurchasesRepository, UnfulfilledPayment,
};
use crate::repository::{
    create_collection_if_missing, create_index_if_missing, is_duplicate_key,
    is_transaction_conflict, tickets_repository::entity::TicketInsertEntity, Error,
    PaymentStatus, Ticket, EVENTS, TICKETS,
};
use axum::async_trait;
use bson::{doc, Bson, DateTime, Document};
use mongodb::{error::ErrorKind, ClientSession, Database};
use std::sync::Arc;
use time::OffsetDateTime;

const PURCHASES: &str = "purchases";
const UNFULFILLED_PAYMENTS: &str = "unfulfilled_payments";
const INDEX_NAME_UNIQUE_PAYMENT_REFERENCE: &str = "unique_payment_reference";

pub struct PurchasesRepositoryImpl {
    database: Database,
}

impl PurchasesRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        // Collections can't be created implicitly inside a transaction
        for name in [EVENTS, TICKETS, PURCHASES, UNFULFILLED_PAYMENTS] {
            create_collection_if_missing(&database, name).await?;
        }

        for name in [PURCHASES, UNFULFILLED_PAYMENTS] {
            create_index_if_missing(
                &database.collection::<Document>(name),
                INDEX_NAME_UNIQUE_PAYMENT_REFERENCE,
                doc! { "payment_reference": 1 },
                true,
            )
            .await?;
        }

        Ok(Self { database })
    }

    fn map_transaction_error(err: mongodb::error::Error) -> Error {
        match is_transaction_conflict(&err) {
            true => Error::TransactionConflict(err),
            false => Error::Mongo(err),
        }
    }

    async fn insert_in_transaction(
        &self,
        session: &mut ClientSession,
        purchase: &NewPurchase,
        expected_total_tickets: i64,
    ) -> Result<InsertedPurchase, Error> {
        let quantity = purchase.tickets.len() as u32;
        let decrement = -i64::from(quantity);

        let update_result = self
            .database
            .collection::<Document>(EVENTS)
            .update_one(
                doc! {
                    "_id": purchase.event_id,
                    "total_tickets": expected_total_tickets,
                },
                doc! {
                    "$inc": {
                        "total_tickets": decrement,
                    }
                },
            )
            .session(&mut *session)
            .await
            .map_err(Self::map_transaction_error)?;

        if update_result.matched_count != 1 {
            return Err(Error::NoDocumentUpdated);
        }

        let created_at = DateTime::from(purchase.created_at);
        let buyer_id = bson::Uuid::from(purchase.buyer_id);

        let insert_result = self
            .database
            .collection::<PurchaseInsertEntity>(PURCHASES)
            .insert_one(PurchaseInsertEntity {
                payment_reference: &purchase.payment_reference,
                event_id: purchase.event_id,
                buyer_id,
                quantity,
                amount: purchase.amount,
                currency: &purchase.currency,
                created_at,
            })
            .session(&mut *session)
            .await
            .map_err(|err| match is_duplicate_key(&err) {
                true => Error::InsertUniqueViolation,
                false => Self::map_transaction_error(err),
            })?;

        let Bson::ObjectId(id) = insert_result.inserted_id else {
            tracing::error!("invalid type of inserted '_id'");
            return Err(Error::Mongo(
                ErrorKind::Custom(Arc::new("invalid type of inserted '_id'")).into(),
            ));
        };

        let ticket_entities = purchase
            .tickets
            .iter()
            .enumerate()
            .map(|(index, ticket)| TicketInsertEntity {
                event_id: purchase.event_id,
                payment_reference: &purchase.payment_reference,
                buyer_id,
                index: index as u32,
                attendee_name: &ticket.attendee_name,
                email: &ticket.email,
                code: &ticket.code,
                payment_status: PaymentStatus::Paid,
                used: false,
                used_at: None,
                redemption_id: None,
                created_at,
            })
            .collect::<Vec<_>>();

        let insert_many_result = self
            .database
            .collection::<TicketInsertEntity>(TICKETS)
            .insert_many(&ticket_entities)
            .session(&mut *session)
            .await
            .map_err(|err| match is_duplicate_key(&err) {
                true => Error::TicketCodeCollision,
                false => Self::map_transaction_error(err),
            })?;

        let mut tickets = Vec::with_capacity(purchase.tickets.len());
        for (index, ticket) in purchase.tickets.iter().enumerate() {
            let Some(Bson::ObjectId(ticket_id)) = insert_many_result.inserted_ids.get(&index)
            else {
                tracing::error!(index, "invalid type of inserted ticket '_id'");
                return Err(Error::Mongo(
                    ErrorKind::Custom(Arc::new("invalid type of inserted ticket '_id'")).into(),
                ));
            };

            tickets.push(Ticket {
                id: *ticket_id,
                event_id: purchase.event_id,
                payment_reference: purchase.payment_reference.clone(),
                buyer_id: purchase.buyer_id,
                index: index as u32,
                attendee_name: ticket.attendee_name.clone(),
                email: ticket.email.clone(),
                code: ticket.code.clone(),
                payment_status: PaymentStatus::Paid,
                used: false,
                used_at: None,
                redemption_id: None,
                created_at: purchase.created_at,
            });
        }

        Ok(InsertedPurchase {
            purchase: Purchase {
                id,
                payment_reference: purchase.payment_reference.clone(),
                event_id: purchase.event_id,
                buyer_id: purchase.buyer_id,
                quantity,
                amount: purchase.amount,
                currency: purchase.currency.clone(),
                created_at: purchase.created_at,
            },
            tickets,
        })
    }
}

#[async_trait]
impl PurchasesRepository for PurchasesRepositoryImpl {
    async fn find_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> Result<Option<Purchase>, Error> {
        let purchase = self
            .database
            .collection::<PurchaseFindEntity>(PURCHASES)
            .find_one(doc! {
                "payment_reference": payment_reference,
            })
            .await?
            .map(Purchase::from);

        Ok(purchase)
    }

    async fn insert(
        &self,
        purchase: NewPurchase,
        expected_total_tickets: i64,
    ) -> Result<InsertedPurchase, Error> {
        let mut session = self.database.client().start_session().await?;
        session.start_transaction().await?;

        let inserted_purchase = match self
            .insert_in_transaction(&mut session, &purchase, expected_total_tickets)
            .await
        {
            Ok(inserted_purchase) => inserted_purchase,
            Err(err) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    tracing::warn!(err = %abort_err, "failed to abort transaction");
                }
                return Err(err);
            }
        };

        session
            .commit_transaction()
            .await
            .map_err(Self::map_transaction_error)?;

        Ok(inserted_purchase)
    }

    async fn flag_unfulfilled(&self, payment: UnfulfilledPayment) -> Result<(), Error> {
        let update_result = self
            .database
            .collection::<Document>(UNFULFILLED_PAYMENTS)
            .update_one(
                doc! {
                    "payment_reference": payment.payment_reference.as_str(),
                },
                doc! {
                    "$set": {
                        "event_id": payment.event_id,
                        "buyer_id": bson::Uuid::from(payment.buyer_id),
                        "quantity": i64::from(payment.quantity),
                        "amount": payment.amount.to_string(),
                        "currency": payment.currency.as_str(),
                        "reason": payment.reason.as_ref(),
                    },
                    "$setOnInsert": {
                        "flagged_at": DateTime::from(OffsetDateTime::now_utc()),
                    }
                },
            )
            .upsert(true)
            .await;

        match update_result {
            Ok(_) => Ok(()),
            // concurrent upsert of the same reference already flagged it
            Err(err) if is_duplicate_key(&err) => Ok(()),
            Err(err) => Err(Error::Mongo(err)),
        }
    }
}
