//! Low-stock shopping list derivation.
//!
//! A product is low when its current quantity is at or below its minimum.
//! Each low product yields one item sized to bring it back to the minimum,
//! never less than one unit.

use crate::domain::catalog::Product;
use crate::domain::ids::{IdGenerator, IdKind};
use crate::domain::shopping_list::ShoppingListItem;

pub const MIN_RESTOCK_QUANTITY: f64 = 1.0;

pub fn needed_quantity(product: &Product) -> f64 {
    (product.minimum_quantity - product.current_quantity).max(MIN_RESTOCK_QUANTITY)
}

/// Products that would appear on an auto list, in input order.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

pub fn derive_items(products: &[Product], ids: &dyn IdGenerator) -> Vec<ShoppingListItem> {
    low_stock(products)
        .into_iter()
        .map(|product| ShoppingListItem {
            id: ids.next_id(IdKind::ListItem),
            product_id: Some(product.id.clone()),
            custom_name: None,
            quantity: needed_quantity(product),
            unit: product.unit.clone(),
            is_purchased: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ids::SequentialIdGenerator;

    fn product(id: &str, current: f64, minimum: f64, unit: &str) -> Product {
        Product {
            id: id.to_string(),
            family_id: "f_1".to_string(),
            category_id: None,
            name: format!("product {}", id),
            current_quantity: current,
            minimum_quantity: minimum,
            unit: unit.to_string(),
            created_by: "u_1".to_string(),
        }
    }

    #[test]
    fn test_below_minimum_restocks_the_difference() {
        let ids = SequentialIdGenerator::new();
        let items = derive_items(&[product("p_1", 2.0, 5.0, "kg")], &ids);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id.as_deref(), Some("p_1"));
        assert_eq!(items[0].quantity, 3.0);
        assert_eq!(items[0].unit, "kg");
        assert!(!items[0].is_purchased);
        assert!(items[0].custom_name.is_none());
        assert!(items[0].id.starts_with("i_"));
    }

    #[test]
    fn test_at_minimum_restocks_one_unit() {
        let ids = SequentialIdGenerator::new();
        let items = derive_items(&[product("p_1", 5.0, 5.0, "pcs")], &ids);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 1.0);
    }

    #[test]
    fn test_above_minimum_is_excluded() {
        let ids = SequentialIdGenerator::new();
        let items = derive_items(&[product("p_1", 6.0, 5.0, "pcs")], &ids);
        assert!(items.is_empty());
    }

    #[test]
    fn test_small_shortfall_is_floored_to_one() {
        let ids = SequentialIdGenerator::new();
        let items = derive_items(&[product("p_1", 4.5, 5.0, "l")], &ids);
        assert_eq!(items[0].quantity, 1.0);
    }

    #[test]
    fn test_zero_minimum_and_zero_stock_still_restocks() {
        let ids = SequentialIdGenerator::new();
        let items = derive_items(&[product("p_1", 0.0, 0.0, "pcs")], &ids);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 1.0);
    }

    #[test]
    fn test_mixed_catalog_keeps_input_order_and_one_item_per_product() {
        let ids = SequentialIdGenerator::new();
        let products = vec![
            product("p_a", 0.0, 10.0, "kg"),
            product("p_b", 20.0, 10.0, "kg"),
            product("p_c", 3.0, 3.0, "pcs"),
            product("p_d", 1.0, 4.0, "l"),
        ];

        let items = derive_items(&products, &ids);
        let refs: Vec<_> = items.iter().map(|i| i.product_id.clone().unwrap()).collect();
        assert_eq!(refs, vec!["p_a", "p_c", "p_d"]);

        let quantities: Vec<f64> = items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![10.0, 1.0, 3.0]);
    }

    #[test]
    fn test_every_low_product_matches_the_restock_formula() {
        let ids = SequentialIdGenerator::new();
        let products: Vec<Product> = (0..20)
            .map(|i| product(&format!("p_{}", i), (i % 7) as f64, (i % 5) as f64, "u"))
            .collect();

        let items = derive_items(&products, &ids);
        let low: Vec<&Product> = products
            .iter()
            .filter(|p| p.current_quantity <= p.minimum_quantity)
            .collect();

        assert_eq!(items.len(), low.len());
        for (item, p) in items.iter().zip(low) {
            assert_eq!(item.product_id.as_deref(), Some(p.id.as_str()));
            let expected = (p.minimum_quantity - p.current_quantity).max(1.0);
            assert_eq!(item.quantity, expected);
        }
    }

    #[test]
    fn test_empty_catalog_yields_no_items() {
        let ids = SequentialIdGenerator::new();
        assert!(derive_items(&[], &ids).is_empty());
    }
}
