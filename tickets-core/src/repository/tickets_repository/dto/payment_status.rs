use serde::{Deserialize, Serialize};
use strum::AsRefStr;

///
/// Only [PaymentStatus::Paid] tickets are created by this service.
/// Pending and failed rows are written by the checkout flow.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn as_ref_matches_serde() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
        ] {
            let bson = bson::to_bson(&status).unwrap();
            assert_eq!(bson.as_str(), Some(status.as_ref()));
        }
    }
}
