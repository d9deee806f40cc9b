use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::{options::ClientOptions, Client, Database};
use reqwest::Url;
use serde_json::{json, Value};
use std::sync::Once;
use tokio::net::TcpListener;
use uuid::Uuid;

static INIT_ENV_ONCE: Once = Once::new();
static FAKE_GATEWAY_ONCE: Once = Once::new();

pub const TICKET_PRICE: &str = "25.00";

pub fn init_env() {
    INIT_ENV_ONCE.call_once(|| {
        let _ = dotenvy::dotenv();
    });

    FAKE_GATEWAY_ONCE.call_once(spawn_fake_gateway);
}

pub fn address() -> String {
    std::env::var("TICKETS_CORE_BIND_ADDRESS").unwrap()
}

pub async fn database() -> Database {
    let db_connection_string = std::env::var("TICKETS_CORE_DB_CONNECTION_STRING").unwrap();
    let db_name = std::env::var("TICKETS_CORE_DB_NAME").unwrap();

    let db_client_options = ClientOptions::parse(db_connection_string).await.unwrap();
    let db_client = Client::with_options(db_client_options).unwrap();

    db_client.database(&db_name)
}

pub async fn insert_event(total_tickets: i64) -> ObjectId {
    let insert_result = database()
        .await
        .collection::<Document>("events")
        .insert_one(doc! {
            "total_tickets": total_tickets,
            "price": TICKET_PRICE,
            "organizer_id": "integration-tests",
        })
        .await
        .unwrap();

    let Bson::ObjectId(id) = insert_result.inserted_id else {
        panic!("invalid id type");
    };

    id
}

pub async fn remaining_tickets(event_id: ObjectId) -> i64 {
    database()
        .await
        .collection::<Document>("events")
        .find_one(doc! { "_id": event_id })
        .await
        .unwrap()
        .unwrap()
        .get_i64("total_tickets")
        .unwrap()
}

///
/// Reference accepted by the fake gateway as a successful payment of `amount` minor units
///
pub fn paid_reference(amount: i64) -> String {
    format!("paid-{amount}-{}", Uuid::new_v4().simple())
}

pub fn purchase_body(payment_reference: &str, event_id: ObjectId, quantity: u32) -> Value {
    json!({
        "payment_reference": payment_reference,
        "event_id": event_id.to_hex(),
        "quantity": quantity,
        "buyer": {
            "id": Uuid::new_v4(),
            "name": "Ada Obi",
            "email": "ada@example.com"
        }
    })
}

///
/// Gateway listening on TICKETS_CORE_PAYMENT_GATEWAY_URL.
/// It runs on its own thread so it outlives runtimes of single tests
///
fn spawn_fake_gateway() {
    let gateway_url = std::env::var("TICKETS_CORE_PAYMENT_GATEWAY_URL").unwrap();
    let gateway_url = Url::parse(&gateway_url).unwrap();
    let address = format!(
        "{}:{}",
        gateway_url.host_str().unwrap(),
        gateway_url.port_or_known_default().unwrap()
    );
    let route = format!(
        "{}/transaction/verify/:reference",
        gateway_url.path().trim_end_matches('/')
    );

    let (ready_tx, ready_rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = TcpListener::bind(address).await.unwrap();
            ready_tx.send(()).unwrap();

            let router = Router::new().route(&route, get(verify));
            axum::serve(listener, router).await.unwrap();
        });
    });

    ready_rx.recv().unwrap();
}

async fn verify(Path(reference): Path<String>) -> Result<Json<Value>, StatusCode> {
    let amount = reference
        .strip_prefix("paid-")
        .and_then(|rest| rest.split('-').next())
        .and_then(|amount| amount.parse::<i64>().ok())
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(json!({
        "status": true,
        "message": "Verification successful",
        "data": {
            "status": "success",
            "reference": reference,
            "amount": amount,
            "currency": std::env::var("TICKETS_CORE_PAYMENT_CURRENCY").unwrap(),
        }
    })))
}
