use anyhow::anyhow;
use std::{net::SocketAddr, time::Duration};

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub db_connection_string: String,
    pub db_name: String,

    pub max_http_content_len: usize,

    /// Upper bound for a single purchase or a single redemption phase
    pub operation_timeout: Duration,

    pub purchase_max_quantity: u32,
    pub purchase_max_attempts: u32,
    pub purchase_retry_interval: Duration,

    pub payment_gateway_url: String,
    pub payment_gateway_secret_key: String,
    pub payment_gateway_timeout: Duration,
    pub payment_currency: String,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("TICKETS_CORE_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("TICKETS_CORE_LOG_FILENAME")?;
        let bind_address = Self::env_var("TICKETS_CORE_BIND_ADDRESS")?.parse()?;
        let db_connection_string = Self::env_var("TICKETS_CORE_DB_CONNECTION_STRING")?;
        let db_name = Self::env_var("TICKETS_CORE_DB_NAME")?;
        let max_http_content_len = Self::env_var("TICKETS_CORE_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let operation_timeout = Self::env_var("TICKETS_CORE_OPERATION_TIMEOUT")?.parse()?;
        let operation_timeout = Duration::from_millis(operation_timeout);
        let purchase_max_quantity = Self::env_var("TICKETS_CORE_PURCHASE_MAX_QUANTITY")?.parse()?;
        let purchase_max_attempts = Self::env_var("TICKETS_CORE_PURCHASE_MAX_ATTEMPTS")?.parse()?;
        if purchase_max_attempts == 0 {
            return Err(anyhow!(
                "TICKETS_CORE_PURCHASE_MAX_ATTEMPTS need to be at least 1"
            ));
        }
        let purchase_retry_interval =
            Self::env_var("TICKETS_CORE_PURCHASE_RETRY_INTERVAL")?.parse()?;
        let purchase_retry_interval = Duration::from_millis(purchase_retry_interval);
        let payment_gateway_url = Self::env_var("TICKETS_CORE_PAYMENT_GATEWAY_URL")?;
        let payment_gateway_secret_key = Self::env_var("TICKETS_CORE_PAYMENT_GATEWAY_SECRET_KEY")?;
        let payment_gateway_timeout =
            Self::env_var("TICKETS_CORE_PAYMENT_GATEWAY_TIMEOUT")?.parse()?;
        let payment_gateway_timeout = Duration::from_millis(payment_gateway_timeout);
        let payment_currency = Self::env_var("TICKETS_CORE_PAYMENT_CURRENCY")?;

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            db_connection_string,
            db_name,
            max_http_content_len,
            operation_timeout,
            purchase_max_quantity,
            purchase_max_attempts,
            purchase_retry_interval,
            payment_gateway_url,
            payment_gateway_secret_key,
            payment_gateway_timeout,
            payment_currency,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }
}
