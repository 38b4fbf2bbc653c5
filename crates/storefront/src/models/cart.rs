//! Cart domain model and pure line operations.
//!
//! Both backing modes (guest session, account backend) share this
//! shape; persistence and remote calls live in
//! [`crate::services::cart`]. Guest line ids are locally generated
//! UUIDs, account line ids are the backend's numeric ids as strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use arta_stone_core::{StoneId, UnitPrice};

/// Flat shipping fee applied to any non-empty cart.
const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Product snapshot carried on a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoneRef {
    pub id: StoneId,
    pub name_en: String,
    pub name_fa: String,
    /// Display price string (e.g. `"$85"`); absent when quote-only.
    pub price: Option<String>,
    pub image: Option<String>,
    pub category_en: String,
    pub category_fa: String,
}

/// Options chosen when adding a stone to the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOptions {
    pub finish: Option<String>,
    pub thickness: Option<String>,
    pub notes: Option<String>,
}

/// A single cart line.
///
/// `quantity` is always at least 1: a mutation that would drop it to
/// zero removes the line instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub stone: StoneRef,
    pub quantity: u32,
    pub selected_finish: Option<String>,
    pub selected_thickness: Option<String>,
    pub notes: Option<String>,
}

/// Ordered cart contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create a cart from existing lines.
    #[must_use]
    pub const fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a stone to the cart, merging into an existing line when the
    /// (stone, finish, thickness) key matches; otherwise appends a new
    /// line with a locally generated id.
    pub fn merge_add(&mut self, stone: StoneRef, quantity: u32, options: LineOptions) {
        let quantity = quantity.max(1);

        if let Some(line) = self.items.iter_mut().find(|item| {
            item.stone.id == stone.id
                && item.selected_finish == options.finish
                && item.selected_thickness == options.thickness
        }) {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(CartItem {
            id: Uuid::new_v4().to_string(),
            stone,
            quantity,
            selected_finish: options.finish,
            selected_thickness: options.thickness,
            notes: options.notes,
        });
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(item_id);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|item| item.id == item_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line by id. Unknown ids are ignored.
    pub fn remove(&mut self, item_id: &str) {
        self.items.retain(|item| item.id != item_id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price x quantity over all lines, in the base
    /// currency. Lines without a parseable price use the catalog
    /// default. Currency conversion is a presentation concern.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| {
                UnitPrice::parse_opt(item.stone.price.as_deref()).amount()
                    * Decimal::from(item.quantity)
            })
            .sum()
    }

    /// Flat shipping fee; free for an empty cart.
    #[must_use]
    pub fn shipping(&self) -> Decimal {
        if self.total() > Decimal::ZERO {
            FLAT_SHIPPING_FEE
        } else {
            Decimal::ZERO
        }
    }

    /// Cart total plus shipping.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.total() + self.shipping()
    }

    /// Sum of line quantities (not the number of lines).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stone(id: i32, price: Option<&str>) -> StoneRef {
        StoneRef {
            id: StoneId::new(id),
            name_en: format!("Stone {id}"),
            name_fa: format!("سنگ {id}"),
            price: price.map(ToOwned::to_owned),
            image: None,
            category_en: "Travertine".to_string(),
            category_fa: "تراورتن".to_string(),
        }
    }

    fn options(finish: Option<&str>, thickness: Option<&str>) -> LineOptions {
        LineOptions {
            finish: finish.map(ToOwned::to_owned),
            thickness: thickness.map(ToOwned::to_owned),
            notes: None,
        }
    }

    #[test]
    fn test_merge_add_same_key_merges_into_one_line() {
        let mut cart = Cart::default();
        cart.merge_add(stone(1, Some("$85")), 2, options(Some("polished"), None));
        cart.merge_add(stone(1, Some("$85")), 3, options(Some("polished"), None));
        cart.merge_add(stone(1, Some("$85")), 1, options(Some("polished"), None));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().unwrap().quantity, 6);
    }

    #[test]
    fn test_merge_add_different_options_separate_lines() {
        let mut cart = Cart::default();
        cart.merge_add(stone(1, Some("$85")), 1, options(Some("polished"), None));
        cart.merge_add(stone(1, Some("$85")), 1, options(Some("honed"), None));
        cart.merge_add(stone(1, Some("$85")), 1, options(Some("polished"), Some("20mm")));

        assert_eq!(cart.items.len(), 3);
    }

    #[test]
    fn test_merge_add_zero_quantity_counts_as_one() {
        let mut cart = Cart::default();
        cart.merge_add(stone(1, None), 0, LineOptions::default());
        assert_eq!(cart.items.first().unwrap().quantity, 1);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::default();
        cart.merge_add(stone(1, Some("$85")), 2, LineOptions::default());
        let id = cart.items.first().unwrap().id.clone();

        cart.set_quantity(&id, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_updates_in_place() {
        let mut cart = Cart::default();
        cart.merge_add(stone(1, Some("$85")), 2, LineOptions::default());
        let id = cart.items.first().unwrap().id.clone();

        cart.set_quantity(&id, 7);
        assert_eq!(cart.items.first().unwrap().quantity, 7);
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::default();
        cart.merge_add(stone(1, Some("$85")), 2, LineOptions::default());
        cart.remove("no-such-line");
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::default();
        cart.merge_add(stone(1, Some("$85")), 3, LineOptions::default());
        cart.merge_add(stone(2, Some("$120")), 4, LineOptions::default());

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_total_with_default_price_fallback() {
        let mut cart = Cart::default();
        cart.merge_add(stone(1, Some("$100")), 2, LineOptions::default());
        cart.merge_add(stone(2, None), 1, LineOptions::default());

        // 2 x 100 + 1 x 85 (default)
        assert_eq!(cart.total(), Decimal::from(285));
    }

    #[test]
    fn test_shipping_flat_fee_above_zero() {
        let mut cart = Cart::default();
        assert_eq!(cart.shipping(), Decimal::ZERO);
        assert_eq!(cart.grand_total(), Decimal::ZERO);

        cart.merge_add(stone(1, Some("$85")), 1, LineOptions::default());
        assert_eq!(cart.shipping(), Decimal::from(50));
        assert_eq!(cart.grand_total(), Decimal::from(135));
    }

    #[test]
    fn test_storage_round_trip_is_lossless() {
        let mut cart = Cart::default();
        cart.merge_add(
            stone(1, Some("$85")),
            2,
            LineOptions {
                finish: Some("polished".to_string()),
                thickness: Some("30mm".to_string()),
                notes: Some("lobby floor".to_string()),
            },
        );
        cart.merge_add(stone(2, None), 1, LineOptions::default());

        let json = serde_json::to_string(&cart.items).unwrap();
        let reloaded: Vec<CartItem> = serde_json::from_str(&json).unwrap();

        assert_eq!(reloaded, cart.items);
    }
}
