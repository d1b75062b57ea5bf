//! In-memory implementation of ProductRepository
//!
//! Keeps products in insertion order. Backs the HTTP tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductId, UpdateProduct};
use crate::repository::ProductRepository;

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = Product {
            id: ProductId::new(),
            name: input.name,
            price: input.price,
            available: input.available,
        };
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn update(
        &self,
        id: ProductId,
        changes: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            changes.apply_to(product);
            product.clone()
        }))
    }

    async fn delete(&self, id: ProductId) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: 9.99,
            available: true,
        }
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget("Widget")).await.unwrap();

        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(created.clone()));

        let updated = repo
            .update(
                created.id,
                UpdateProduct {
                    price: Some(1.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 1.5);
        assert_eq!(updated.name, "Widget");

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryProductRepository::new();
        for name in ["a", "b", "c"] {
            repo.create(widget(name)).await.unwrap();
        }

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryProductRepository::new();
        let result = repo
            .update(ProductId::new(), UpdateProduct::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
