use crate::data::memory::InMemoryStore;
use crate::domain::error::DomainError;
use crate::domain::repository::ShoppingListRepository;
use crate::domain::shopping_list::ShoppingList;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, instrument};

#[async_trait]
impl ShoppingListRepository for InMemoryStore {
    #[instrument(skip(self, list), fields(list_id = %list.id, family_id = %list.family_id, items = list.items.len()))]
    async fn save_list(&self, list: ShoppingList) -> Result<()> {
        self.commit(move |s| s.shopping_lists.push(list)).await?;
        debug!("Shopping list saved to store");
        Ok(())
    }

    #[instrument(skip(self), fields(list_id = id))]
    async fn find_list_by_id(&self, id: &str) -> Result<Option<ShoppingList>> {
        Ok(self
            .read(|s| s.shopping_lists.iter().find(|l| l.id == id).cloned())
            .await)
    }

    #[instrument(skip(self), fields(list_id = list_id, item_id = item_id))]
    async fn set_item_purchased(
        &self,
        list_id: &str,
        item_id: &str,
        is_purchased: bool,
    ) -> Result<ShoppingList> {
        let (list_id, item_id) = (list_id.to_string(), item_id.to_string());
        let updated = self
            .commit(move |s| -> Result<ShoppingList, DomainError> {
                let list = s
                    .shopping_lists
                    .iter_mut()
                    .find(|l| l.id == list_id)
                    .ok_or_else(|| DomainError::not_found("Shopping list", &list_id))?;
                let item = list
                    .item_mut(&item_id)
                    .ok_or_else(|| DomainError::not_found("Shopping list item", &item_id))?;
                item.is_purchased = is_purchased;
                Ok(list.clone())
            })
            .await?;
        debug!(is_purchased, "Item purchase flag written");
        Ok(updated?)
    }

    #[instrument(skip(self), fields(family_id = family_id))]
    async fn list_lists(&self, family_id: &str) -> Result<Vec<ShoppingList>> {
        Ok(self
            .read(|s| {
                s.shopping_lists
                    .iter()
                    .filter(|l| l.family_id == family_id)
                    .cloned()
                    .collect()
            })
            .await)
    }
}
