use super::ApplicationEnv;
use crate::{
    repository::{EventsRepositoryImpl, PurchasesRepositoryImpl, TicketsRepositoryImpl},
    service::{
        payment_verifier::{HttpPaymentVerifier, HttpPaymentVerifierConfig},
        purchase_service::{PurchaseService, PurchaseServiceConfig, PurchaseServiceImpl},
        redemption_service::{RedemptionService, RedemptionServiceConfig, RedemptionServiceImpl},
    },
};
use axum::extract::FromRef;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub purchase_service: Arc<dyn PurchaseService>,
    pub redemption_service: Arc<dyn RedemptionService>,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("creating repositories");
    let events_repository = EventsRepositoryImpl::new(db.clone()).await?;
    let events_repository = Arc::new(events_repository);

    let purchases_repository = PurchasesRepositoryImpl::new(db.clone()).await?;
    let purchases_repository = Arc::new(purchases_repository);

    let tickets_repository = TicketsRepositoryImpl::new(db).await?;
    let tickets_repository = Arc::new(tickets_repository);

    tracing::info!("creating services");
    let config = HttpPaymentVerifierConfig {
        gateway_url: env.payment_gateway_url.clone(),
        secret_key: env.payment_gateway_secret_key.clone(),
        timeout: env.payment_gateway_timeout,
    };
    let payment_verifier = HttpPaymentVerifier::new(config)?;
    let payment_verifier = Arc::new(payment_verifier);

    let config = PurchaseServiceConfig {
        currency: env.payment_currency.clone(),
        max_quantity: env.purchase_max_quantity,
        max_attempts: env.purchase_max_attempts,
        retry_interval: env.purchase_retry_interval,
        timeout: env.operation_timeout,
    };
    let purchase_service = PurchaseServiceImpl::new(
        config,
        payment_verifier,
        events_repository,
        purchases_repository,
        tickets_repository.clone(),
    );
    let purchase_service = Arc::new(purchase_service);

    let config = RedemptionServiceConfig {
        timeout: env.operation_timeout,
    };
    let redemption_service = RedemptionServiceImpl::new(config, tickets_repository);
    let redemption_service = Arc::new(redemption_service);

    Ok((
        ApplicationState {
            purchase_service,
            redemption_service,
        },
        ApplicationStateToClose { db_client },
    ))
}
