mod error;
mod events_repository;
mod purchases_repository;
mod tickets_repository;

pub use error::*;
pub use events_repository::*;
pub use purchases_repository::*;
pub use tickets_repository::*;

use bson::Document;
use mongodb::{options::IndexOptions, Collection, Database, IndexModel};

async fn create_collection_if_missing(
    database: &Database,
    name: &str,
) -> Result<(), mongodb::error::Error> {
    let collection_names = database.list_collection_names().await?;

    if !collection_names.iter().any(|collection| collection == name) {
        tracing::debug!(collection = name, "creating collection");
        database.create_collection(name).await?;
    }

    Ok(())
}

async fn create_index_if_missing(
    collection: &Collection<Document>,
    name: &str,
    keys: Document,
    unique: bool,
) -> Result<(), mongodb::error::Error> {
    tracing::debug!(collection = collection.name(), "fetching index names");
    let index_names = collection.list_index_names().await?;

    if !index_names.iter().any(|index| index == name) {
        let index = IndexModel::builder()
            .keys(keys)
            .options(
                IndexOptions::builder()
                    .name(name.to_string())
                    .unique(unique)
                    .build(),
            )
            .build();

        collection.create_index(index).await?;
        tracing::debug!(collection = collection.name(), index = name, "created index");
    }

    Ok(())
}
