//! Conversions from backend wire types into local domain shapes.

use crate::models::{Cart, CartItem, StoneRef};

use super::types::{RemoteCart, RemoteCartItem, RemoteStone};

/// Convert the backend cart into the local cart shape.
#[must_use]
pub fn cart_from_remote(remote: RemoteCart) -> Cart {
    Cart::new(remote.items.into_iter().map(cart_item_from_remote).collect())
}

/// Convert a backend cart line into the local line shape.
///
/// Account line ids are the backend's numeric ids rendered as strings,
/// so the same `CartItem` shape serves both cart modes.
#[must_use]
pub fn cart_item_from_remote(item: RemoteCartItem) -> CartItem {
    CartItem {
        id: item.id.to_string(),
        stone: stone_ref_from_remote(&item.stone),
        quantity: item.quantity,
        selected_finish: none_if_empty(item.selected_finish),
        selected_thickness: none_if_empty(item.selected_thickness),
        notes: none_if_empty(item.notes),
    }
}

/// Snapshot the fields of a stone that cart lines carry.
#[must_use]
pub fn stone_ref_from_remote(stone: &RemoteStone) -> StoneRef {
    StoneRef {
        id: stone.id,
        name_en: stone.name_en.clone(),
        name_fa: stone.name_fa.clone(),
        price: stone.price.clone(),
        image: stone.images.first().map(|image| image.image.clone()),
        category_en: stone.category.name_en.clone(),
        category_fa: stone.category.name_fa.clone(),
    }
}

/// The backend sends absent options as empty strings; local shapes use
/// `None`.
fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commerce::types::{RemoteCategory, RemoteImage};
    use arta_stone_core::{CartItemId, StoneId};

    fn remote_stone() -> RemoteStone {
        RemoteStone {
            id: StoneId::new(4),
            name_en: "Silver Travertine".to_string(),
            name_fa: "تراورتن نقره‌ای".to_string(),
            description_en: String::new(),
            description_fa: String::new(),
            category: RemoteCategory {
                id: 1,
                name_en: "Travertine".to_string(),
                name_fa: "تراورتن".to_string(),
                slug: "travertine".to_string(),
            },
            price: Some("$85".to_string()),
            origin: None,
            images: vec![RemoteImage {
                id: 9,
                image: "/media/stones/silver.jpg".to_string(),
                alt_text: None,
            }],
            finishes: vec!["polished".to_string()],
            thickness_options: vec!["20mm".to_string()],
            is_active: true,
        }
    }

    #[test]
    fn test_cart_item_from_remote() {
        let item = cart_item_from_remote(RemoteCartItem {
            id: CartItemId::new(12),
            stone: remote_stone(),
            quantity: 3,
            selected_finish: "polished".to_string(),
            selected_thickness: String::new(),
            notes: String::new(),
        });

        assert_eq!(item.id, "12");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.selected_finish.as_deref(), Some("polished"));
        assert_eq!(item.selected_thickness, None);
        assert_eq!(item.notes, None);
        assert_eq!(item.stone.image.as_deref(), Some("/media/stones/silver.jpg"));
        assert_eq!(item.stone.price.as_deref(), Some("$85"));
    }

    #[test]
    fn test_cart_from_remote_preserves_order() {
        let cart = cart_from_remote(RemoteCart {
            id: 1,
            items: vec![
                RemoteCartItem {
                    id: CartItemId::new(1),
                    stone: remote_stone(),
                    quantity: 1,
                    selected_finish: String::new(),
                    selected_thickness: String::new(),
                    notes: String::new(),
                },
                RemoteCartItem {
                    id: CartItemId::new(2),
                    stone: remote_stone(),
                    quantity: 2,
                    selected_finish: "honed".to_string(),
                    selected_thickness: String::new(),
                    notes: String::new(),
                },
            ],
            total_amount: Some("255.00".to_string()),
        });

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items.first().map(|i| i.id.as_str()), Some("1"));
        assert_eq!(cart.item_count(), 3);
    }
}
