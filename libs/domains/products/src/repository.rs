use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductId, UpdateProduct};

/// Repository trait for Product persistence
///
/// Inputs arrive already validated; implementations only store and fetch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product; the store assigns its id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// All products in store order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>>;

    /// Merge the supplied fields into a product and return the updated document
    ///
    /// `None` when the product does not exist.
    async fn update(&self, id: ProductId, changes: UpdateProduct)
    -> ProductResult<Option<Product>>;

    /// Delete a product by ID; `false` when nothing was deleted
    async fn delete(&self, id: ProductId) -> ProductResult<bool>;
}
