//! Cart Aggregator
//!
//! Groups a flat list of cart lines into one [`MerchantCart`] per restaurant.
//! Groups are ordered by the first appearance of each restaurant and items
//! keep their insertion order inside a group, so the result does not depend
//! on hash-map iteration order.

use shared::models::{CartLineItem, MerchantCart};

/// Insertion-ordered mapping `restaurant_id → MerchantCart`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MerchantCarts {
    carts: Vec<MerchantCart>,
}

impl MerchantCarts {
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    pub fn get(&self, restaurant_id: &str) -> Option<&MerchantCart> {
        self.carts.iter().find(|c| c.restaurant_id == restaurant_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MerchantCart> {
        self.carts.iter()
    }

    pub fn restaurant_ids(&self) -> Vec<&str> {
        self.carts.iter().map(|c| c.restaurant_id.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[MerchantCart] {
        &self.carts
    }

    pub fn into_vec(self) -> Vec<MerchantCart> {
        self.carts
    }
}

/// Group cart lines by restaurant
///
/// Merchant attributes (name, markup, location) are taken from the first line
/// seen for each restaurant. An empty input yields an empty mapping.
pub fn group_by_merchant<'a, I>(lines: I) -> MerchantCarts
where
    I: IntoIterator<Item = &'a CartLineItem>,
{
    let mut carts: Vec<MerchantCart> = Vec::new();

    for line in lines {
        let restaurant_id = line.merchant.restaurant_id.as_str();
        match carts.iter_mut().find(|c| c.restaurant_id == restaurant_id) {
            Some(cart) => cart.items.push(line.item.clone()),
            None => {
                let mut cart = MerchantCart::for_merchant(&line.merchant);
                cart.items.push(line.item.clone());
                carts.push(cart);
            }
        }
    }

    MerchantCarts { carts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::models::{CartItem, MerchantInfo};

    fn merchant(id: &str) -> MerchantInfo {
        MerchantInfo {
            restaurant_id: id.to_string(),
            restaurant_name: format!("Restaurant {}", id),
            markup_percent: dec!(15),
            location: None,
        }
    }

    fn line(restaurant: &str, menu_item: &str) -> CartLineItem {
        CartLineItem {
            merchant: merchant(restaurant),
            item: CartItem {
                menu_item_id: menu_item.to_string(),
                name: menu_item.to_string(),
                unit_base_price: dec!(100),
                quantity: 1,
                selected_options: vec![],
            },
        }
    }

    #[test]
    fn test_empty_input() {
        let groups = group_by_merchant(&Vec::<CartLineItem>::new());
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }

    #[test]
    fn test_groups_by_first_appearance() {
        let lines = vec![
            line("b", "burger"),
            line("a", "adobo"),
            line("b", "fries"),
            line("a", "rice"),
            line("c", "cake"),
        ];
        let groups = group_by_merchant(&lines);

        assert_eq!(groups.restaurant_ids(), vec!["b", "a", "c"]);

        let b = groups.get("b").unwrap();
        let names: Vec<&str> = b.items.iter().map(|i| i.menu_item_id.as_str()).collect();
        assert_eq!(names, vec!["burger", "fries"]);

        let a = groups.get("a").unwrap();
        assert_eq!(a.items.len(), 2);
        assert_eq!(a.markup_percent, dec!(15));
    }

    #[test]
    fn test_no_duplicate_restaurants() {
        let lines: Vec<CartLineItem> = (0..10)
            .map(|i| line(if i % 2 == 0 { "x" } else { "y" }, &format!("item-{}", i)))
            .collect();
        let groups = group_by_merchant(&lines);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|c| c.items.len() == 5));
    }

    #[test]
    fn test_deterministic() {
        let lines = vec![line("a", "1"), line("b", "2"), line("a", "3")];
        assert_eq!(group_by_merchant(&lines), group_by_merchant(&lines));
    }
}
