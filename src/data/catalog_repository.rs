use crate::data::memory::InMemoryStore;
use crate::domain::catalog::{Category, Product, UpdateProduct};
use crate::domain::error::DomainError;
use crate::domain::repository::CatalogRepository;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, instrument, trace};

#[async_trait]
impl CatalogRepository for InMemoryStore {
    #[instrument(skip(self, category), fields(category_id = %category.id, family_id = %category.family_id))]
    async fn save_category(&self, category: Category) -> Result<()> {
        self.commit(move |s| s.categories.push(category)).await?;
        debug!("Category saved to store");
        Ok(())
    }

    #[instrument(skip(self), fields(category_id = id))]
    async fn find_category_by_id(&self, id: &str) -> Result<Option<Category>> {
        Ok(self
            .read(|s| s.categories.iter().find(|c| c.id == id).cloned())
            .await)
    }

    #[instrument(skip(self), fields(family_id = family_id))]
    async fn list_categories(&self, family_id: &str) -> Result<Vec<Category>> {
        Ok(self
            .read(|s| {
                s.categories
                    .iter()
                    .filter(|c| c.family_id == family_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id, family_id = %product.family_id))]
    async fn save_product(&self, product: Product) -> Result<()> {
        self.commit(move |s| s.products.push(product)).await?;
        debug!("Product saved to store");
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = id))]
    async fn find_product_by_id(&self, id: &str) -> Result<Option<Product>> {
        trace!("Looking up product by ID in store");
        Ok(self
            .read(|s| s.products.iter().find(|p| p.id == id).cloned())
            .await)
    }

    #[instrument(skip(self, patch), fields(product_id = id))]
    async fn patch_product(&self, id: &str, patch: UpdateProduct) -> Result<Option<Product>> {
        let id = id.to_string();
        let patched = self
            .commit(move |s| -> Result<Option<Product>, DomainError> {
                let Some(product) = s.products.iter_mut().find(|p| p.id == id) else {
                    return Ok(None);
                };
                patch.apply_to(product)?;
                Ok(Some(product.clone()))
            })
            .await?;
        debug!(found = matches!(patched, Ok(Some(_))), "Product patch finished");
        Ok(patched?)
    }

    #[instrument(skip(self), fields(product_id = id))]
    async fn delete_product(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        let removed = self
            .commit(move |s| {
                let before = s.products.len();
                s.products.retain(|p| p.id != id);
                s.products.len() != before
            })
            .await?;
        debug!(removed, "Product delete finished");
        Ok(removed)
    }

    #[instrument(skip(self), fields(family_id = family_id))]
    async fn list_products(&self, family_id: &str) -> Result<Vec<Product>> {
        Ok(self
            .read(|s| {
                s.products
                    .iter()
                    .filter(|p| p.family_id == family_id)
                    .cloned()
                    .collect()
            })
            .await)
    }
}
