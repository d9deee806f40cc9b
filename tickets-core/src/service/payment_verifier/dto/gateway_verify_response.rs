use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GatewayVerifyResponse {
    pub status: bool,
    pub data: Option<GatewayTransaction>,
}

#[derive(Debug, Deserialize)]
pub struct GatewayTransaction {
    pub status: String,
    pub reference: String,

    /// Amount in the smallest currency unit
    pub amount: i64,
    pub currency: String,
}
