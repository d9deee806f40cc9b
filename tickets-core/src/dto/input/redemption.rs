use serde::Deserialize;

///
/// Code scanned from the ticket QR.
/// Debug is not derived so the code does not end up in logs.
///
#[derive(Clone, Deserialize)]
pub struct Redemption {
    pub code: String,
}
