use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}
