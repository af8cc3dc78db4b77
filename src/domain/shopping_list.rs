use serde::{Deserialize, Serialize};

pub const AUTO_LIST_NAME: &str = "Auto List";
pub const DEFAULT_ITEM_UNIT: &str = "unit";
pub const DEFAULT_ITEM_QUANTITY: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: String,
    pub family_id: String,
    pub name: String,
    pub created_at: String,
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut ShoppingListItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }
}

/// A `None` product id marks an ad-hoc item identified by `custom_name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: String,
    pub product_id: Option<String>,
    pub custom_name: Option<String>,
    pub quantity: f64,
    pub unit: String,
    #[serde(rename = "is_purchased")]
    pub is_purchased: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateShoppingList {
    pub name: Option<String>,
    pub items: Option<Vec<NewListItem>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl NewListItem {
    pub fn product(product_id: &str) -> Self {
        Self {
            product_id: Some(product_id.to_string()),
            ..Default::default()
        }
    }

    pub fn custom(name: &str) -> Self {
        Self {
            custom_name: Some(name.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetPurchased {
    #[serde(rename = "is_purchased", alias = "isPurchased")]
    pub is_purchased: bool,
}
