use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{
    Client, Collection, Database as MongoDatabase,
    bson::{Document, doc, oid::ObjectId},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::catalog::Catalog;
use crate::config::CONFIG;
use crate::data_models::Product;

/// Documents pulled per round trip when reading a whole collection.
pub const SCROLL_BATCH_SIZE: u32 = 1000;

/// Main database wrapper providing connection management and collection access
#[derive(Debug, Clone)]
pub struct Database {
    client: Client,
    db: MongoDatabase,
}

impl Database {
    /// Create a new Database instance with custom URI and database name.
    /// Useful for testing with a different database.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        let client_options = ClientOptions::parse(uri)
            .await
            .context("Failed to parse MongoDB connection string")?;

        let client =
            Client::with_options(client_options).context("Failed to create MongoDB client")?;

        // Ping the database to verify connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to connect to MongoDB")?;

        log::info!("Connected to MongoDB database: {}", db_name);

        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    /// Create a Database instance using environment configuration
    pub async fn from_config() -> Result<Self> {
        Self::new(&CONFIG.mongo_uri, &CONFIG.mongo_db_name).await
    }

    /// Get a typed collection by name
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.db.collection(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Thin typed wrapper over a collection for the operations the catalog needs.
pub struct Repository<T>
where
    T: Send + Sync,
{
    collection: Collection<T>,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    /// Insert multiple documents
    pub async fn insert_many(&self, docs: &[T]) -> Result<Vec<ObjectId>> {
        if docs.is_empty() {
            return Ok(Vec::new());
        }
        let result = self
            .collection
            .insert_many(docs)
            .await
            .context("Failed to insert documents")?;

        Ok(result
            .inserted_ids
            .values()
            .filter_map(|id| id.as_object_id())
            .collect())
    }

    /// Find all documents matching a filter, pulling them in fixed-size batches
    pub async fn find(&self, filter: Document) -> Result<Vec<T>> {
        let cursor = self
            .collection
            .find(filter)
            .batch_size(SCROLL_BATCH_SIZE)
            .await
            .context("Failed to execute find query")?;

        cursor
            .try_collect()
            .await
            .context("Failed to collect results")
    }

    /// Find all documents in the collection
    pub async fn find_all(&self) -> Result<Vec<T>> {
        self.find(doc! {}).await
    }

    /// Count documents matching a filter
    pub async fn count(&self, filter: Document) -> Result<u64> {
        self.collection
            .count_documents(filter)
            .await
            .context("Failed to count documents")
    }

    /// Delete multiple documents matching a filter
    pub async fn delete_many(&self, filter: Document) -> Result<u64> {
        let result = self
            .collection
            .delete_many(filter)
            .await
            .context("Failed to delete documents")?;

        Ok(result.deleted_count)
    }
}

// =============================================================================
// Product catalog
// =============================================================================

pub struct ProductRepo {
    repo: Repository<Product>,
}

impl ProductRepo {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            repo: Repository::new(db.collection(collection)),
        }
    }

    /// Uses the collection named by `CATALOG_COLLECTION`.
    pub fn from_config(db: &Database) -> Self {
        Self::new(db, &CONFIG.catalog_collection)
    }

    pub async fn insert_many(&self, products: &[Product]) -> Result<Vec<ObjectId>> {
        self.repo.insert_many(products).await
    }

    pub async fn list_all(&self) -> Result<Vec<Product>> {
        self.repo.find_all().await
    }

    pub async fn count(&self) -> Result<u64> {
        self.repo.count(doc! {}).await
    }

    pub async fn clear(&self) -> Result<u64> {
        self.repo.delete_many(doc! {}).await
    }
}

#[async_trait]
impl Catalog for ProductRepo {
    async fn products(&self) -> Result<Vec<Product>> {
        let products = self.list_all().await?;
        log::debug!("loaded {} products from catalog", products.len());
        Ok(products)
    }
}

// =============================================================================
// Test utilities
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_models::SearchResult;
    use test_utils::*;

    #[tokio::test]
    #[ignore = "requires a running MongoDB"]
    async fn test_product_catalog_roundtrip() -> Result<()> {
        let (db, db_name) = create_test_db().await?;
        let repo = ProductRepo::new(&db, "products");

        let products = vec![
            Product::new(SearchResult::new("Black Jeans", 24.0, 4.2, 31, "/img/1.png"))
                .with_category("Western")
                .with_individual_category("jeans")
                .with_colour("Black"),
            Product::new(SearchResult::new("Red Kurta", 18.5, 3.9, 7, "/img/2.png"))
                .with_category("Indian Wear")
                .with_individual_category("kurtas")
                .with_colour("Red"),
        ];

        let ids = repo.insert_many(&products).await?;
        assert_eq!(ids.len(), 2);
        assert_eq!(repo.count().await?, 2);

        let loaded = repo.products().await?;
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|p| p.id.is_some()));
        assert_eq!(loaded[0].listing.name, "Black Jeans");
        assert_eq!(loaded[1].colour.as_deref(), Some("Red"));

        assert_eq!(repo.clear().await?, 2);
        assert_eq!(repo.count().await?, 0);

        cleanup_test_db(&db, &db_name).await?;

        Ok(())
    }
}
