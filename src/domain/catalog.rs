//! Family catalog: categories and products with stock levels.

use crate::domain::error::DomainError;
use crate::domain::validation::{require_quantity, require_text};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub family_id: String,
    pub name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateCategory {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub family_id: String,
    pub category_id: Option<String>,
    pub name: String,
    #[serde(rename = "current_quantity")]
    pub current_quantity: f64,
    #[serde(rename = "minimum_quantity")]
    pub minimum_quantity: f64,
    pub unit: String,
    #[serde(rename = "created_by")]
    pub created_by: String,
}

impl Product {
    /// At-minimum counts as low.
    pub fn is_low_stock(&self) -> bool {
        self.current_quantity <= self.minimum_quantity
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: Option<String>,
    pub unit: Option<String>,
    #[serde(alias = "current_quantity")]
    pub quantity: Option<f64>,
    #[serde(alias = "minimum_quantity")]
    pub minimum: Option<f64>,
    pub category_id: Option<String>,
}

/// A product request that passed field validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub minimum: f64,
    pub category_id: Option<String>,
}

impl CreateProduct {
    pub fn validate(self) -> Result<NewProduct, DomainError> {
        let name = require_text("name", self.name)?;
        let unit = require_text("unit", self.unit)?;
        let quantity = require_quantity("quantity", self.quantity)?;
        let minimum = require_quantity("minimum", self.minimum)?;
        Ok(NewProduct {
            name,
            unit,
            quantity,
            minimum,
            category_id: self.category_id,
        })
    }
}

/// Partial update. Absent fields leave the stored value untouched;
/// `categoryId: null` clears the category.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(alias = "current_quantity", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(alias = "minimum_quantity", skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<Option<String>>,
}

impl UpdateProduct {
    /// Validates every present field before touching `product`, so a rejected
    /// patch leaves it unchanged.
    pub fn apply_to(self, product: &mut Product) -> Result<(), DomainError> {
        let name = self.name.map(|n| require_text("name", Some(n))).transpose()?;
        let unit = self.unit.map(|u| require_text("unit", Some(u))).transpose()?;
        let quantity = self
            .quantity
            .map(|q| require_quantity("quantity", Some(q)))
            .transpose()?;
        let minimum = self
            .minimum
            .map(|m| require_quantity("minimum", Some(m)))
            .transpose()?;

        if let Some(name) = name {
            product.name = name;
        }
        if let Some(unit) = unit {
            product.unit = unit;
        }
        if let Some(quantity) = quantity {
            product.current_quantity = quantity;
        }
        if let Some(minimum) = minimum {
            product.minimum_quantity = minimum;
        }
        if let Some(category_id) = self.category_id {
            product.category_id = category_id;
        }
        Ok(())
    }
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(current: f64, minimum: f64) -> Product {
        Product {
            id: "p_1".to_string(),
            family_id: "f_1".to_string(),
            category_id: Some("c_1".to_string()),
            name: "Rice".to_string(),
            current_quantity: current,
            minimum_quantity: minimum,
            unit: "kg".to_string(),
            created_by: "u_1".to_string(),
        }
    }

    fn create(minimum: Option<f64>) -> CreateProduct {
        CreateProduct {
            name: Some("Milk".to_string()),
            unit: Some("l".to_string()),
            quantity: Some(0.0),
            minimum,
            category_id: None,
        }
    }

    #[test]
    fn test_is_low_stock_inclusive_at_minimum() {
        assert!(product(2.0, 5.0).is_low_stock());
        assert!(product(5.0, 5.0).is_low_stock());
        assert!(!product(6.0, 5.0).is_low_stock());
    }

    #[test]
    fn test_validate_accepts_zero_quantity_and_zero_minimum() {
        let new = create(Some(0.0)).validate().unwrap();
        assert_eq!(new.quantity, 0.0);
        assert_eq!(new.minimum, 0.0);
        assert_eq!(new.name, "Milk");
    }

    #[test]
    fn test_validate_rejects_missing_minimum() {
        let err = create(None).validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("minimum")));
    }

    #[test]
    fn test_validate_rejects_blank_name_and_unit() {
        let mut req = create(Some(1.0));
        req.name = Some("   ".to_string());
        assert!(req.validate().is_err());

        let mut req = create(Some(1.0));
        req.unit = None;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_and_non_finite_quantities() {
        let mut req = create(Some(1.0));
        req.quantity = Some(-1.0);
        assert!(req.validate().is_err());

        assert!(create(Some(f64::NAN)).validate().is_err());
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut p = product(2.0, 5.0);
        let patch = UpdateProduct {
            quantity: Some(7.5),
            ..Default::default()
        };
        patch.apply_to(&mut p).unwrap();

        assert_eq!(p.current_quantity, 7.5);
        assert_eq!(p.minimum_quantity, 5.0);
        assert_eq!(p.name, "Rice");
        assert_eq!(p.category_id.as_deref(), Some("c_1"));
    }

    #[test]
    fn test_rejected_patch_leaves_product_unchanged() {
        let mut p = product(2.0, 5.0);
        let patch = UpdateProduct {
            name: Some("Basmati".to_string()),
            minimum: Some(-3.0),
            ..Default::default()
        };
        assert!(patch.apply_to(&mut p).is_err());
        assert_eq!(p, product(2.0, 5.0));
    }

    #[test]
    fn test_patch_category_null_clears_and_absent_keeps() {
        let patch: UpdateProduct = serde_json::from_str(r#"{"categoryId": null}"#).unwrap();
        let mut p = product(1.0, 1.0);
        patch.apply_to(&mut p).unwrap();
        assert_eq!(p.category_id, None);

        let patch: UpdateProduct = serde_json::from_str(r#"{"name": "Oats"}"#).unwrap();
        let mut p = product(1.0, 1.0);
        patch.apply_to(&mut p).unwrap();
        assert_eq!(p.category_id.as_deref(), Some("c_1"));
        assert_eq!(p.name, "Oats");
    }

    #[test]
    fn test_product_serializes_with_snapshot_field_names() {
        let json = serde_json::to_value(product(2.0, 5.0)).unwrap();
        assert_eq!(json["familyId"], "f_1");
        assert_eq!(json["categoryId"], "c_1");
        assert_eq!(json["current_quantity"], 2.0);
        assert_eq!(json["minimum_quantity"], 5.0);
        assert_eq!(json["created_by"], "u_1");
    }

    #[test]
    fn test_create_product_accepts_stored_field_aliases() {
        let req: CreateProduct = serde_json::from_str(
            r#"{"name":"Eggs","unit":"pcs","current_quantity":4,"minimum_quantity":6}"#,
        )
        .unwrap();
        let new = req.validate().unwrap();
        assert_eq!(new.quantity, 4.0);
        assert_eq!(new.minimum, 6.0);
    }
}
