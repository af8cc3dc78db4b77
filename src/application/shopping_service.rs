use crate::domain::auto_list;
use crate::domain::error::DomainError;
use crate::domain::ids::{IdGenerator, IdKind};
use crate::domain::repository::{CatalogRepository, FamilyRepository, ShoppingListRepository};
use crate::domain::shopping_list::{
    AUTO_LIST_NAME, CreateShoppingList, DEFAULT_ITEM_QUANTITY, DEFAULT_ITEM_UNIT, NewListItem,
    ShoppingList, ShoppingListItem,
};
use crate::domain::validation::require_text;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct ShoppingListService<R>
where
    R: ShoppingListRepository + CatalogRepository + FamilyRepository,
{
    repository: Arc<R>,
    ids: Arc<dyn IdGenerator>,
}

impl<R> ShoppingListService<R>
where
    R: ShoppingListRepository + CatalogRepository + FamilyRepository,
{
    pub fn new(repository: Arc<R>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    fn new_list(&self, family_id: &str, name: String, items: Vec<ShoppingListItem>) -> ShoppingList {
        ShoppingList {
            id: self.ids.next_id(IdKind::ShoppingList),
            family_id: family_id.to_string(),
            name,
            created_at: Utc::now().to_rfc3339(),
            items,
        }
    }

    /// Builds an "Auto List" from every product at or below its minimum.
    ///
    /// Always stores a new list, even when it is empty. An unknown family is
    /// not rejected: it simply has no products, so the list comes back empty.
    #[instrument(skip(self))]
    pub async fn generate_auto_list(&self, family_id: &str) -> Result<ShoppingList> {
        if self.repository.find_family_by_id(family_id).await?.is_none() {
            warn!(family_id, "Auto list requested for unknown family");
        }

        let products = self.repository.list_products(family_id).await?;
        let items = auto_list::derive_items(&products, self.ids.as_ref());
        debug!(products = products.len(), low_stock = items.len(), "Derived auto list items");

        let list = self.new_list(family_id, AUTO_LIST_NAME.to_string(), items);
        self.repository.save_list(list.clone()).await?;

        info!(list_id = %list.id, items = list.items.len(), "Auto list created");
        Ok(list)
    }

    /// Builds a list from explicit items. Each item needs a product of this
    /// family or a custom name; quantity defaults to 1 and unit to "unit".
    #[instrument(skip(self, req))]
    pub async fn create_list(&self, family_id: &str, req: CreateShoppingList) -> Result<ShoppingList> {
        let name = require_text("name", req.name)?;
        let requested = req
            .items
            .ok_or_else(|| DomainError::validation("items must be an array"))?;

        if self.repository.find_family_by_id(family_id).await?.is_none() {
            return Err(DomainError::not_found("Family", family_id).into());
        }

        let mut items = Vec::with_capacity(requested.len());
        for (index, item) in requested.into_iter().enumerate() {
            items.push(self.build_item(family_id, index, item).await?);
        }

        let list = self.new_list(family_id, name, items);
        self.repository.save_list(list.clone()).await?;

        info!(list_id = %list.id, items = list.items.len(), "Shopping list created");
        Ok(list)
    }

    async fn build_item(
        &self,
        family_id: &str,
        index: usize,
        item: NewListItem,
    ) -> Result<ShoppingListItem> {
        let custom_name = item
            .custom_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let product_id = item.product_id.filter(|id| !id.is_empty());

        if product_id.is_none() && custom_name.is_none() {
            return Err(DomainError::validation(format!(
                "items[{}] needs a productId or a customName",
                index
            ))
            .into());
        }

        if let Some(id) = &product_id {
            match self.repository.find_product_by_id(id).await? {
                Some(p) if p.family_id == family_id => {}
                _ => {
                    return Err(DomainError::validation(format!(
                        "items[{}] references unknown product {}",
                        index, id
                    ))
                    .into());
                }
            }
        }

        let quantity = item.quantity.unwrap_or(DEFAULT_ITEM_QUANTITY);
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(
                DomainError::validation(format!("items[{}] quantity must be positive", index))
                    .into(),
            );
        }

        let unit = item
            .unit
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ITEM_UNIT.to_string());

        Ok(ShoppingListItem {
            id: self.ids.next_id(IdKind::ListItem),
            product_id,
            custom_name,
            quantity,
            unit,
            is_purchased: false,
        })
    }

    pub async fn get_list(&self, list_id: &str) -> Result<ShoppingList> {
        self.repository
            .find_list_by_id(list_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Shopping list", list_id).into())
    }

    pub async fn list_lists(&self, family_id: &str) -> Result<Vec<ShoppingList>> {
        self.repository.list_lists(family_id).await
    }

    #[instrument(skip(self))]
    pub async fn set_item_purchased(
        &self,
        list_id: &str,
        item_id: &str,
        is_purchased: bool,
    ) -> Result<ShoppingList> {
        let list = self
            .repository
            .set_item_purchased(list_id, item_id, is_purchased)
            .await?;

        info!("Item purchase state updated");
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryStore;
    use crate::domain::catalog::Product;
    use crate::domain::family::{Family, FamilyMember};
    use crate::infrastructure::ids::SequentialIdGenerator;

    fn product(id: &str, family_id: &str, current: f64, minimum: f64) -> Product {
        Product {
            id: id.to_string(),
            family_id: family_id.to_string(),
            category_id: None,
            name: format!("Product {}", id),
            current_quantity: current,
            minimum_quantity: minimum,
            unit: "kg".to_string(),
            created_by: "u_1".to_string(),
        }
    }

    async fn setup() -> (Arc<InMemoryStore>, ShoppingListService<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        store
            .create_family(
                Family {
                    id: "f_1".to_string(),
                    name: "Smiths".to_string(),
                    created_by: "u_1".to_string(),
                },
                FamilyMember::admin("f_1", "u_1"),
            )
            .await
            .unwrap();
        for p in [
            product("p_low", "f_1", 2.0, 5.0),
            product("p_at", "f_1", 5.0, 5.0),
            product("p_high", "f_1", 6.0, 5.0),
            product("p_other", "f_2", 0.0, 5.0),
        ] {
            store.save_product(p).await.unwrap();
        }
        let service = ShoppingListService::new(store.clone(), Arc::new(SequentialIdGenerator::new()));
        (store, service)
    }

    fn validation(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_)))
    }

    #[tokio::test]
    async fn test_auto_list_contains_family_low_stock_only() {
        let (_, service) = setup().await;
        let list = service.generate_auto_list("f_1").await.unwrap();

        assert_eq!(list.name, "Auto List");
        assert_eq!(list.family_id, "f_1");
        assert!(list.id.starts_with("sl_"));
        let lines: Vec<(String, f64)> = list
            .items
            .iter()
            .map(|i| (i.product_id.clone().unwrap(), i.quantity))
            .collect();
        assert_eq!(
            lines,
            vec![("p_low".to_string(), 3.0), ("p_at".to_string(), 1.0)]
        );
        assert!(list.items.iter().all(|i| !i.is_purchased && i.unit == "kg"));
    }

    #[tokio::test]
    async fn test_auto_list_always_creates_new_record() {
        let (_, service) = setup().await;
        let first = service.generate_auto_list("f_1").await.unwrap();
        let second = service.generate_auto_list("f_1").await.unwrap();

        assert_ne!(first.id, second.id);
        let quantities = |l: &ShoppingList| l.items.iter().map(|i| i.quantity).collect::<Vec<_>>();
        assert_eq!(quantities(&first), quantities(&second));
        assert_eq!(service.list_lists("f_1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_auto_list_for_unknown_family_is_empty_not_error() {
        let (_, service) = setup().await;
        let list = service.generate_auto_list("f_nowhere").await.unwrap();
        assert!(list.items.is_empty());
    }

    #[tokio::test]
    async fn test_manual_list_applies_defaults() {
        let (_, service) = setup().await;
        let list = service
            .create_list(
                "f_1",
                CreateShoppingList {
                    name: Some("Party".to_string()),
                    items: Some(vec![
                        NewListItem::custom("Balloons"),
                        NewListItem {
                            product_id: Some("p_high".to_string()),
                            quantity: Some(2.5),
                            unit: Some("kg".to_string()),
                            ..Default::default()
                        },
                    ]),
                },
            )
            .await
            .unwrap();

        assert_eq!(list.name, "Party");
        assert_eq!(list.items[0].custom_name.as_deref(), Some("Balloons"));
        assert_eq!(list.items[0].quantity, 1.0);
        assert_eq!(list.items[0].unit, "unit");
        assert_eq!(list.items[1].product_id.as_deref(), Some("p_high"));
        assert_eq!(list.items[1].quantity, 2.5);
        assert!(list.items.iter().all(|i| !i.is_purchased));
    }

    #[tokio::test]
    async fn test_manual_list_rejects_item_without_reference() {
        let (_, service) = setup().await;
        let err = service
            .create_list(
                "f_1",
                CreateShoppingList {
                    name: Some("Bad".to_string()),
                    items: Some(vec![NewListItem::default()]),
                },
            )
            .await
            .unwrap_err();
        assert!(validation(&err));
        assert!(service.list_lists("f_1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_manual_list_rejects_missing_name_or_items() {
        let (_, service) = setup().await;
        let no_name = CreateShoppingList {
            name: None,
            items: Some(Vec::new()),
        };
        assert!(validation(&service.create_list("f_1", no_name).await.unwrap_err()));

        let no_items = CreateShoppingList {
            name: Some("Weekly".to_string()),
            items: None,
        };
        assert!(validation(&service.create_list("f_1", no_items).await.unwrap_err()));
    }

    #[tokio::test]
    async fn test_manual_list_rejects_product_of_other_family() {
        let (_, service) = setup().await;
        let err = service
            .create_list(
                "f_1",
                CreateShoppingList {
                    name: Some("Weekly".to_string()),
                    items: Some(vec![NewListItem::product("p_other")]),
                },
            )
            .await
            .unwrap_err();
        assert!(validation(&err));
    }

    #[tokio::test]
    async fn test_toggle_purchase_persists() {
        let (_, service) = setup().await;
        let list = service.generate_auto_list("f_1").await.unwrap();
        let item_id = list.items[0].id.clone();

        let updated = service
            .set_item_purchased(&list.id, &item_id, true)
            .await
            .unwrap();
        assert!(updated.items[0].is_purchased);
        assert!(!updated.items[1].is_purchased);

        let reloaded = service.get_list(&list.id).await.unwrap();
        assert_eq!(reloaded, updated);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_on_one_list_are_all_kept() {
        let (store, service) = setup().await;
        for i in 0..6 {
            store
                .save_product(product(&format!("p_extra{}", i), "f_1", 0.0, 1.0))
                .await
                .unwrap();
        }
        let service = Arc::new(service);
        let list = service.generate_auto_list("f_1").await.unwrap();
        assert_eq!(list.items.len(), 8);

        let handles: Vec<_> = list
            .items
            .iter()
            .map(|item| {
                let service = service.clone();
                let (list_id, item_id) = (list.id.clone(), item.id.clone());
                tokio::spawn(async move {
                    service.set_item_purchased(&list_id, &item_id, true).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let reloaded = service.get_list(&list.id).await.unwrap();
        assert!(reloaded.items.iter().all(|i| i.is_purchased));
    }

    #[tokio::test]
    async fn test_toggle_unknown_item_is_not_found() {
        let (_, service) = setup().await;
        let list = service.generate_auto_list("f_1").await.unwrap();

        let err = service
            .set_item_purchased(&list.id, "i_missing", true)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_deleting_product_keeps_prior_list_items() {
        let (store, service) = setup().await;
        let list = service.generate_auto_list("f_1").await.unwrap();

        store.delete_product("p_low").await.unwrap();

        let reloaded = service.get_list(&list.id).await.unwrap();
        assert_eq!(reloaded.items[0].product_id.as_deref(), Some("p_low"));
        let next = service.generate_auto_list("f_1").await.unwrap();
        assert_eq!(next.items.len(), 1);
    }
}
