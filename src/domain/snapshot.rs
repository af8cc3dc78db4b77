use crate::domain::catalog::{Category, Product};
use crate::domain::family::{Family, FamilyMember};
use crate::domain::shopping_list::ShoppingList;
use crate::domain::user::User;
use serde::{Deserialize, Serialize};

/// Every collection of the store, persisted as one JSON document.
/// Missing keys load as empty collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub families: Vec<Family>,
    pub family_members: Vec<FamilyMember>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub shopping_lists: Vec<ShoppingList>,
}
