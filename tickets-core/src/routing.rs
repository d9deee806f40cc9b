use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    dto::{input, output},
    error::Error,
    service::{purchase_service::PurchaseService, redemption_service::RedemptionService},
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route("/api/v1/purchases", post(create_purchase))
        .route("/api/v1/redemptions", post(create_redemption))
        .layer(application_middleware.body_limit.clone())
        .route("/health", get(health))
}

async fn create_purchase(
    State(purchase_service): State<Arc<dyn PurchaseService>>,
    Json(purchase): Json<input::Purchase>,
) -> Result<(StatusCode, Json<output::Purchase>), Error> {
    let purchase = purchase_service.purchase(purchase).await?;
    let status_code = match purchase.replayed {
        true => StatusCode::OK,
        false => StatusCode::CREATED,
    };

    Ok((status_code, Json(purchase)))
}

async fn create_redemption(
    State(redemption_service): State<Arc<dyn RedemptionService>>,
    Json(redemption): Json<input::Redemption>,
) -> (StatusCode, Json<output::Redemption>) {
    match redemption_service.redeem(redemption).await {
        Ok(redemption) => (StatusCode::OK, Json(redemption)),
        Err(err) => {
            tracing::error!(%err, "redemption failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(output::Redemption::error()),
            )
        }
    }
}

async fn health() -> StatusCode {
    StatusCode::OK
}
