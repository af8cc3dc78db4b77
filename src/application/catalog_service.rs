use crate::domain::auto_list;
use crate::domain::catalog::{Category, CreateCategory, CreateProduct, Product, UpdateProduct};
use crate::domain::error::DomainError;
use crate::domain::ids::{IdGenerator, IdKind};
use crate::domain::repository::{CatalogRepository, FamilyRepository};
use crate::domain::validation::require_text;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Per-family product registry and categories.
///
/// Any caller may patch or delete any product: there is no role or
/// ownership check on mutations.
pub struct CatalogService<R: CatalogRepository + FamilyRepository> {
    repository: Arc<R>,
    ids: Arc<dyn IdGenerator>,
}

impl<R: CatalogRepository + FamilyRepository> CatalogService<R> {
    pub fn new(repository: Arc<R>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    async fn require_family(&self, family_id: &str) -> Result<()> {
        if self.repository.find_family_by_id(family_id).await?.is_none() {
            return Err(DomainError::not_found("Family", family_id).into());
        }
        Ok(())
    }

    async fn require_category_in_family(&self, category_id: &str, family_id: &str) -> Result<()> {
        match self.repository.find_category_by_id(category_id).await? {
            Some(c) if c.family_id == family_id => Ok(()),
            _ => {
                warn!(category_id, family_id, "Category does not belong to family");
                Err(DomainError::validation(format!("Unknown category: {}", category_id)).into())
            }
        }
    }

    #[instrument(skip(self, req))]
    pub async fn add_category(&self, family_id: &str, req: CreateCategory) -> Result<Category> {
        let name = require_text("name", req.name)?;
        self.require_family(family_id).await?;

        let category = Category {
            id: self.ids.next_id(IdKind::Category),
            family_id: family_id.to_string(),
            name,
        };
        self.repository.save_category(category.clone()).await?;

        info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    pub async fn list_categories(&self, family_id: &str) -> Result<Vec<Category>> {
        self.repository.list_categories(family_id).await
    }

    #[instrument(skip(self, req))]
    pub async fn add_product(
        &self,
        family_id: &str,
        creator_id: &str,
        req: CreateProduct,
    ) -> Result<Product> {
        let new = req.validate()?;
        self.require_family(family_id).await?;
        if let Some(category_id) = &new.category_id {
            self.require_category_in_family(category_id, family_id)
                .await?;
        }

        let product = Product {
            id: self.ids.next_id(IdKind::Product),
            family_id: family_id.to_string(),
            category_id: new.category_id,
            name: new.name,
            current_quantity: new.quantity,
            minimum_quantity: new.minimum,
            unit: new.unit,
            created_by: creator_id.to_string(),
        };
        self.repository.save_product(product.clone()).await?;

        info!(
            product_id = %product.id,
            current = product.current_quantity,
            minimum = product.minimum_quantity,
            "Product created"
        );
        Ok(product)
    }

    pub async fn get_product(&self, product_id: &str) -> Result<Product> {
        self.repository
            .find_product_by_id(product_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", product_id).into())
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, product_id: &str, patch: UpdateProduct) -> Result<Product> {
        let existing = self.get_product(product_id).await?;
        if let Some(Some(category_id)) = &patch.category_id {
            self.require_category_in_family(category_id, &existing.family_id)
                .await?;
        }

        let product = self
            .repository
            .patch_product(product_id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", product_id))?;

        info!(
            current = product.current_quantity,
            minimum = product.minimum_quantity,
            "Product updated"
        );
        Ok(product)
    }

    /// Hard delete. Shopping lists keep items pointing at the removed id.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: &str) -> Result<()> {
        if !self.repository.delete_product(product_id).await? {
            return Err(DomainError::not_found("Product", product_id).into());
        }
        info!("Product deleted");
        Ok(())
    }

    pub async fn list_products(&self, family_id: &str) -> Result<Vec<Product>> {
        self.repository.list_products(family_id).await
    }

    /// What the next auto list would contain, without creating it.
    pub async fn list_low_stock(&self, family_id: &str) -> Result<Vec<Product>> {
        let products = self.repository.list_products(family_id).await?;
        Ok(auto_list::low_stock(&products).into_iter().cloned().collect())
    }
}
