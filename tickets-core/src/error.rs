use crate::{dto::output, repository, service::payment_verifier};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use strum::IntoStaticStr;

#[derive(Debug, thiserror::Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("payment not confirmed: {0}")]
    PaymentNotConfirmed(&'static str),

    #[error("insufficient inventory: requested {requested}, available {available}")]
    InsufficientInventory { requested: u32, available: i64 },

    #[error("event not found")]
    EventNotFound,

    #[error("payment reference already used for a different purchase")]
    PaymentReferenceReused,

    #[error("purchase conflict: retries exhausted")]
    Conflict,

    #[error("operation timed out")]
    Timeout,

    ///
    /// Generated ticket code already exists.
    /// It means that code generation is broken, so it's never retried.
    ///
    #[error("ticket code collision")]
    TicketCodeCollision,

    #[error("payment gateway error: {0}")]
    PaymentGateway(#[from] payment_verifier::Error),

    #[error("database error: {0}")]
    Database(#[from] repository::Error),
}

impl Error {
    fn code(&self) -> &'static str {
        self.into()
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::PaymentNotConfirmed(_) => StatusCode::PAYMENT_REQUIRED,
            Error::InsufficientInventory {
                requested: _,
                available: _,
            } => StatusCode::CONFLICT,
            Error::EventNotFound => StatusCode::NOT_FOUND,
            Error::PaymentReferenceReused => StatusCode::CONFLICT,
            Error::Conflict => StatusCode::SERVICE_UNAVAILABLE,
            Error::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            Error::TicketCodeCollision => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PaymentGateway(_) => StatusCode::BAD_GATEWAY,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        match status_code.is_server_error() {
            true => tracing::error!(err = %self),
            false => tracing::warn!(err = %self),
        }

        let body = output::ErrorResponse {
            error: self.code(),
        };

        (status_code, Json(body)).into_response()
    }
}
