use super::{entity::TicketFindEntity, PaymentStatus, Ticket, TicketsRepository};
use crate::repository::{self, create_collection_if_missing, create_index_if_missing, Error};
use axum::async_trait;
use bson::{doc, oid::ObjectId, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::Database;
use time::OffsetDateTime;
use uuid::Uuid;

pub const TICKETS: &str = "tickets";
const INDEX_NAME_UNIQUE_CODE: &str = "unique_code";
const INDEX_NAME_PAYMENT_REFERENCE: &str = "index_payment_reference";

pub struct TicketsRepositoryImpl {
    database: Database,
}

impl TicketsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        create_collection_if_missing(&database, TICKETS).await?;

        let collection = database.collection::<Document>(TICKETS);
        create_index_if_missing(&collection, INDEX_NAME_UNIQUE_CODE, doc! { "code": 1 }, true)
            .await?;
        create_index_if_missing(
            &collection,
            INDEX_NAME_PAYMENT_REFERENCE,
            doc! { "payment_reference": 1, "index": 1 },
            false,
        )
        .await?;

        Ok(Self { database })
    }
}

#[async_trait]
impl TicketsRepository for TicketsRepositoryImpl {
    async fn find_paid(&self, code: &str) -> Result<Option<Ticket>, repository::Error> {
        let ticket = self
            .database
            .collection::<TicketFindEntity>(TICKETS)
            .find_one(doc! {
                "code": code,
                "payment_status": PaymentStatus::Paid.as_ref(),
            })
            .await?
            .map(Ticket::from);

        Ok(ticket)
    }

    async fn find(&self, id: ObjectId) -> Result<Option<Ticket>, repository::Error> {
        let ticket = self
            .database
            .collection::<TicketFindEntity>(TICKETS)
            .find_one(doc! {
                "_id": id,
            })
            .await?
            .map(Ticket::from);

        Ok(ticket)
    }

    async fn find_many_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> Result<Vec<Ticket>, repository::Error> {
        let tickets = self
            .database
            .collection::<TicketFindEntity>(TICKETS)
            .find(doc! {
                "payment_reference": payment_reference,
            })
            .sort(doc! {
                "index": 1,
            })
            .await?
            .map_ok(Ticket::from)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(tickets)
    }

    async fn update_used(
        &self,
        id: ObjectId,
        used_at: OffsetDateTime,
        redemption_id: Uuid,
    ) -> Result<(), repository::Error> {
        let redemption_id = bson::Uuid::from(redemption_id);
        let update_result = self
            .database
            .collection::<Document>(TICKETS)
            .update_one(
                doc! {
                    "_id": id,
                    "$or": [
                        { "used": false },
                        { "redemption_id": redemption_id },
                    ],
                },
                doc! {
                    "$set": {
                        "used": true,
                        "used_at": DateTime::from(used_at),
                        "redemption_id": redemption_id,
                    }
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::repository::test::{create_test_database, destroy_test_database};
    use bson::Bson;
    use std::sync::Arc;

    async fn insert_ticket(
        db: &Database,
        code: &str,
        payment_status: PaymentStatus,
        used: bool,
    ) -> ObjectId {
        let insert_result = db
            .collection::<Document>(TICKETS)
            .insert_one(doc! {
                "event_id": ObjectId::new(),
                "payment_reference": "reference",
                "buyer_id": bson::Uuid::from(Uuid::new_v4()),
                "index": 0_i64,
                "attendee_name": "Ada Obi",
                "email": "ada@example.com",
                "code": code,
                "payment_status": payment_status.as_ref(),
                "used": used,
                "used_at": None as Option<DateTime>,
                "redemption_id": None as Option<bson::Uuid>,
                "created_at": DateTime::from(OffsetDateTime::now_utc()),
            })
            .await
            .unwrap();
        let Bson::ObjectId(id) = insert_result.inserted_id else {
            panic!("invalid id type");
        };

        id
    }

    #[tokio::test]
    async fn find_paid_exist() {
        let db = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(db.clone()).await.unwrap();

        let id = insert_ticket(&db, "T-1", PaymentStatus::Paid, false).await;

        let ticket = repository.find_paid("T-1").await.unwrap().unwrap();

        assert_eq!(ticket.id, id);
        assert_eq!(ticket.payment_status, PaymentStatus::Paid);
        assert!(!ticket.used);

        destroy_test_database(db).await;
    }

    #[tokio::test]
    async fn find_paid_ignores_pending() {
        let db = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(db.clone()).await.unwrap();

        insert_ticket(&db, "T-1", PaymentStatus::Pending, false).await;

        let ticket = repository.find_paid("T-1").await.unwrap();

        assert!(ticket.is_none());

        destroy_test_database(db).await;
    }

    #[tokio::test]
    async fn find_paid_not_exist() {
        let db = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(db.clone()).await.unwrap();

        let ticket = repository.find_paid("code that does not exist").await.unwrap();

        assert!(ticket.is_none());

        destroy_test_database(db).await;
    }

    #[tokio::test]
    async fn update_used_value_changed() {
        let db = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(db.clone()).await.unwrap();

        let id = insert_ticket(&db, "T-1", PaymentStatus::Paid, false).await;
        let redemption_id = Uuid::new_v4();

        repository
            .update_used(id, OffsetDateTime::now_utc(), redemption_id)
            .await
            .unwrap();

        let ticket = repository.find(id).await.unwrap().unwrap();

        assert!(ticket.used);
        assert!(ticket.used_at.is_some());
        assert_eq!(ticket.redemption_id, Some(redemption_id));

        destroy_test_database(db).await;
    }

    #[tokio::test]
    async fn update_used_already_used() {
        let db = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(db.clone()).await.unwrap();

        let id = insert_ticket(&db, "T-1", PaymentStatus::Paid, true).await;

        let err = repository
            .update_used(id, OffsetDateTime::now_utc(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoDocumentUpdated));

        destroy_test_database(db).await;
    }

    #[tokio::test]
    async fn update_used_repeated_by_same_redemption() {
        let db = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(db.clone()).await.unwrap();

        let id = insert_ticket(&db, "T-1", PaymentStatus::Paid, false).await;
        let used_at = OffsetDateTime::now_utc();
        let redemption_id = Uuid::new_v4();

        repository.update_used(id, used_at, redemption_id).await.unwrap();
        repository.update_used(id, used_at, redemption_id).await.unwrap();

        let err = repository
            .update_used(id, used_at, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoDocumentUpdated));

        let ticket = repository.find(id).await.unwrap().unwrap();
        assert_eq!(ticket.redemption_id, Some(redemption_id));

        destroy_test_database(db).await;
    }

    #[tokio::test]
    async fn update_used_not_exist() {
        let db = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(db.clone()).await.unwrap();

        let err = repository
            .update_used(ObjectId::new(), OffsetDateTime::now_utc(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoDocumentUpdated));

        destroy_test_database(db).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn update_used_concurrent_exactly_one_wins() {
        let db = create_test_database().await;
        let repository = Arc::new(TicketsRepositoryImpl::new(db.clone()).await.unwrap());

        let id = insert_ticket(&db, "T-1", PaymentStatus::Paid, false).await;

        let handles = (0..16)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move {
                    repository
                        .update_used(id, OffsetDateTime::now_utc(), Uuid::new_v4())
                        .await
                })
            })
            .collect::<Vec<_>>();

        let mut updated = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => updated += 1,
                Err(Error::NoDocumentUpdated) => {}
                Err(err) => panic!("unexpected error {err}"),
            }
        }

        assert_eq!(updated, 1);

        destroy_test_database(db).await;
    }

    #[tokio::test]
    async fn find_many_by_payment_reference_sorted() {
        let db = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(db.clone()).await.unwrap();

        for (index, code) in [(1_i64, "B"), (0_i64, "A")] {
            db.collection::<Document>(TICKETS)
                .insert_one(doc! {
                    "event_id": ObjectId::new(),
                    "payment_reference": "reference",
                    "buyer_id": bson::Uuid::from(Uuid::new_v4()),
                    "index": index,
                    "attendee_name": "Ada Obi",
                    "email": "ada@example.com",
                    "code": code,
                    "payment_status": PaymentStatus::Paid.as_ref(),
                    "used": false,
                    "used_at": None as Option<DateTime>,
                    "redemption_id": None as Option<bson::Uuid>,
                    "created_at": DateTime::from(OffsetDateTime::now_utc()),
                })
                .await
                .unwrap();
        }

        let tickets = repository
            .find_many_by_payment_reference("reference")
            .await
            .unwrap();

        let codes = tickets
            .iter()
            .map(|ticket| ticket.code.as_str())
            .collect::<Vec<_>>();
        assert_eq!(codes, vec!["A", "B"]);

        destroy_test_database(db).await;
    }
}
