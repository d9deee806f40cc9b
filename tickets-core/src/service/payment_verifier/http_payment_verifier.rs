use super::{
    dto::GatewayVerifyResponse, Error, HttpPaymentVerifierConfig, PaymentVerifier,
    VerifiedPayment,
};
use anyhow::anyhow;
use axum::async_trait;
use reqwest::{StatusCode, Url};
use rust_decimal::Decimal;

const SUCCESS: &str = "success";
const MINOR_UNIT_SCALE: u32 = 2;

///
/// Verifies payments with the gateway's `GET /transaction/verify/{reference}` endpoint
///
pub struct HttpPaymentVerifier {
    gateway_url: Url,
    secret_key: String,
    client: reqwest::Client,
}

impl HttpPaymentVerifier {
    pub fn new(config: HttpPaymentVerifierConfig) -> anyhow::Result<Self> {
        let gateway_url = Url::parse(&config.gateway_url)?;
        if gateway_url.cannot_be_a_base() {
            return Err(anyhow!("invalid payment gateway url {gateway_url}"));
        }

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            gateway_url,
            secret_key: config.secret_key,
            client,
        })
    }

    fn verify_url(&self, reference: &str) -> Url {
        let mut url = self.gateway_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["transaction", "verify", reference]);
        }

        url
    }
}

#[async_trait]
impl PaymentVerifier for HttpPaymentVerifier {
    #[tracing::instrument(name = "Payment verification", skip_all, fields(%reference))]
    async fn verify(&self, reference: &str) -> Result<VerifiedPayment, Error> {
        tracing::debug!("verifying payment");

        let response = self
            .client
            .get(self.verify_url(reference))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::info!("payment not found");
                return Ok(VerifiedPayment::not_confirmed());
            }
            status if !status.is_success() => {
                tracing::warn!(%status, "unexpected gateway response status");
                return Err(Error::UnexpectedStatus(status));
            }
            _ => {}
        }

        let body = response.json::<GatewayVerifyResponse>().await?;

        let Some(transaction) = body.data.filter(|_| body.status) else {
            tracing::info!("gateway did not return transaction");
            return Ok(VerifiedPayment::not_confirmed());
        };

        let confirmed = transaction.status == SUCCESS && transaction.reference == reference;
        tracing::info!(
            confirmed,
            gateway_status = %transaction.status,
            "verified payment"
        );

        Ok(VerifiedPayment {
            confirmed,
            amount: Decimal::new(transaction.amount, MINOR_UNIT_SCALE),
            currency: transaction.currency,
        })
    }
}
