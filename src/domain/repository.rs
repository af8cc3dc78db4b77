use crate::domain::catalog::{Category, Product, UpdateProduct};
use crate::domain::family::{Family, FamilyMember};
use crate::domain::shopping_list::ShoppingList;
use crate::domain::snapshot::Snapshot;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns `false`, storing nothing, when the email is already taken.
    async fn insert_user(&self, user: User) -> Result<bool>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait FamilyRepository: Send + Sync {
    /// Stores the family together with its founding membership.
    async fn create_family(&self, family: Family, founder: FamilyMember) -> Result<()>;
    async fn find_family_by_id(&self, id: &str) -> Result<Option<Family>>;
    /// Returns `false` when the (family, user) pair already exists.
    async fn add_member(&self, member: FamilyMember) -> Result<bool>;
    async fn list_members(&self, family_id: &str) -> Result<Vec<FamilyMember>>;
    async fn list_families_for_user(&self, user_id: &str) -> Result<Vec<Family>>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn save_category(&self, category: Category) -> Result<()>;
    async fn find_category_by_id(&self, id: &str) -> Result<Option<Category>>;
    async fn list_categories(&self, family_id: &str) -> Result<Vec<Category>>;

    async fn save_product(&self, product: Product) -> Result<()>;
    async fn find_product_by_id(&self, id: &str) -> Result<Option<Product>>;
    /// Applies `patch` to the stored product under the write lock.
    /// `Ok(None)` if no product has this id.
    async fn patch_product(&self, id: &str, patch: UpdateProduct) -> Result<Option<Product>>;
    /// Returns `false` if no product had this id.
    async fn delete_product(&self, id: &str) -> Result<bool>;
    async fn list_products(&self, family_id: &str) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    async fn save_list(&self, list: ShoppingList) -> Result<()>;
    async fn find_list_by_id(&self, id: &str) -> Result<Option<ShoppingList>>;
    /// Sets one item's purchase flag under the write lock and returns the list.
    /// Fails with `NotFound` when the list or the item does not exist.
    async fn set_item_purchased(
        &self,
        list_id: &str,
        item_id: &str,
        is_purchased: bool,
    ) -> Result<ShoppingList>;
    async fn list_lists(&self, family_id: &str) -> Result<Vec<ShoppingList>>;
}

/// Persistence port for the whole store.
#[async_trait]
pub trait SnapshotPersistence: Send + Sync {
    /// `None` when there is nothing stored yet.
    async fn load(&self) -> Result<Option<Snapshot>>;
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;
}
