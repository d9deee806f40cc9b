use bson::oid::ObjectId;
use time::OffsetDateTime;
use uuid::Uuid;

const NONCE_LEN: usize = 16;

///
/// Creates ticket code that is unique by construction:
/// event, buyer and issue time identify the purchase and index
/// identifies the ticket inside of it.
///
/// Random suffix makes codes impossible to enumerate.
///
pub fn generate_ticket_code(
    event_id: ObjectId,
    buyer_id: Uuid,
    issued_at: OffsetDateTime,
    index: u32,
) -> String {
    let nonce = Uuid::new_v4().simple().to_string();

    format!(
        "TKT-{}-{}-{:x}-{}-{}",
        event_id.to_hex(),
        buyer_id.simple(),
        issued_at.unix_timestamp_nanos(),
        index,
        &nonce[..NONCE_LEN],
    )
}
