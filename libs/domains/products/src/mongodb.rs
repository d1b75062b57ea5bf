//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductId, UpdateProduct};
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "products";

/// Stored shape of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub price: f64,
    pub available: bool,
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: doc.id.into(),
            name: doc.name,
            price: doc.price,
            available: doc.available,
        }
    }
}

fn id_filter(id: ProductId) -> Document {
    doc! { "_id": id.as_object_id() }
}

fn set_document(changes: &UpdateProduct) -> Document {
    let mut set = Document::new();
    if let Some(ref name) = changes.name {
        set.insert("name", name.as_str());
    }
    if let Some(price) = changes.price {
        set.insert("price", price);
    }
    if let Some(available) = changes.available {
        set.insert("available", available);
    }
    set
}

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    /// Use the `products` collection of `db`
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<ProductDocument>(COLLECTION_NAME),
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let document = ProductDocument {
            id: ObjectId::new(),
            name: input.name,
            price: input.price,
            available: input.available,
        };

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %document.id, "Product created successfully");
        Ok(document.into())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let document = self.collection.find_one(id_filter(id)).await?;
        Ok(document.map(Product::from))
    }

    #[instrument(skip(self, changes), fields(product_id = %id))]
    async fn update(
        &self,
        id: ProductId,
        changes: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let set = set_document(&changes);
        if set.is_empty() {
            return self.get_by_id(id).await;
        }

        let document = self
            .collection
            .find_one_and_update(id_filter(id), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        if document.is_some() {
            tracing::info!("Product updated successfully");
        }
        Ok(document.map(Product::from))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete(&self, id: ProductId) -> ProductResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!("Product deleted successfully");
        Ok(true)
    }
}
