//! Customer cart session
//!
//! Lines are kept in insertion order. The session tracks the order in which
//! merchants entered the cart; when adding an item from a new merchant would
//! exceed `max_merchants_per_order`, every line of the oldest merchant is
//! evicted first.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::CartLineItem;

use crate::pricing::{MerchantCarts, group_by_merchant};

/// Result of [`CartSession::add_item`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemOutcome {
    /// Index of the line that now holds the item
    pub line_index: usize,
    /// True when the quantity was merged into an existing line
    pub merged: bool,
    /// Restaurants whose lines were evicted to make room
    pub evicted: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CartSession {
    lines: Vec<CartLineItem>,
    /// Restaurant ids, oldest first
    merchant_order: Vec<String>,
    max_merchants: u32,
}

impl CartSession {
    pub fn new(max_merchants_per_order: u32) -> Self {
        Self {
            lines: Vec::new(),
            merchant_order: Vec::new(),
            max_merchants: max_merchants_per_order.max(1),
        }
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Restaurant ids in the order they entered the cart
    pub fn merchant_ids(&self) -> &[String] {
        &self.merchant_order
    }

    pub fn merchant_count(&self) -> usize {
        self.merchant_order.len()
    }

    pub fn max_merchants(&self) -> u32 {
        self.max_merchants
    }

    /// Add a line, merging with an identical one and evicting if needed
    pub fn add_item(&mut self, line: CartLineItem) -> AppResult<AddItemOutcome> {
        if line.item.quantity == 0 {
            return Err(AppError::with_message(
                ErrorCode::InvalidQuantity,
                "Quantity must be at least 1",
            )
            .with_detail("menu_item_id", line.item.menu_item_id.clone()));
        }

        let restaurant_id = line.merchant.restaurant_id.clone();

        if let Some(index) = self.lines.iter().position(|l| {
            l.merchant.restaurant_id == restaurant_id && l.item.is_same_line(&line.item)
        }) {
            let existing = &mut self.lines[index].item;
            existing.quantity = existing.quantity.saturating_add(line.item.quantity);
            return Ok(AddItemOutcome {
                line_index: index,
                merged: true,
                evicted: Vec::new(),
            });
        }

        let mut evicted = Vec::new();
        if !self.merchant_order.contains(&restaurant_id) {
            while self.merchant_order.len() >= self.max_merchants as usize {
                let oldest = self.merchant_order.remove(0);
                self.lines.retain(|l| l.merchant.restaurant_id != oldest);
                tracing::debug!(restaurant_id = %oldest, "Evicted oldest merchant from cart");
                evicted.push(oldest);
            }
            self.merchant_order.push(restaurant_id);
        }

        self.lines.push(line);
        Ok(AddItemOutcome {
            line_index: self.lines.len() - 1,
            merged: false,
            evicted,
        })
    }

    /// Set a line's quantity; 0 removes the line
    pub fn set_quantity(&mut self, line_index: usize, quantity: u32) -> AppResult<()> {
        if line_index >= self.lines.len() {
            return Err(AppError::not_found(format!("Cart line {}", line_index)));
        }
        if quantity == 0 {
            self.remove_line(line_index)?;
        } else {
            self.lines[line_index].item.quantity = quantity;
        }
        Ok(())
    }

    /// Remove a line, returning it
    pub fn remove_line(&mut self, line_index: usize) -> AppResult<CartLineItem> {
        if line_index >= self.lines.len() {
            return Err(AppError::not_found(format!("Cart line {}", line_index)));
        }
        let removed = self.lines.remove(line_index);
        self.forget_merchant_if_empty(&removed.merchant.restaurant_id);
        Ok(removed)
    }

    /// Remove every line of one restaurant
    pub fn clear_merchant(&mut self, restaurant_id: &str) {
        self.lines.retain(|l| l.merchant.restaurant_id != restaurant_id);
        self.merchant_order.retain(|id| id != restaurant_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.merchant_order.clear();
    }

    /// Change the merchant cap, evicting the oldest merchants if now over it
    pub fn set_max_merchants(&mut self, max_merchants_per_order: u32) -> Vec<String> {
        self.max_merchants = max_merchants_per_order.max(1);
        let mut evicted = Vec::new();
        while self.merchant_order.len() > self.max_merchants as usize {
            let oldest = self.merchant_order.remove(0);
            self.lines.retain(|l| l.merchant.restaurant_id != oldest);
            evicted.push(oldest);
        }
        evicted
    }

    /// Group lines into per-merchant carts, ordered by when each merchant
    /// entered the cart
    pub fn merchant_carts(&self) -> MerchantCarts {
        let lines = &self.lines;
        let ordered = self
            .merchant_order
            .iter()
            .flat_map(move |id| lines.iter().filter(move |l| &l.merchant.restaurant_id == id));
        group_by_merchant(ordered)
    }

    fn forget_merchant_if_empty(&mut self, restaurant_id: &str) {
        if !self.lines.iter().any(|l| l.merchant.restaurant_id == restaurant_id) {
            self.merchant_order.retain(|id| id != restaurant_id);
        }
    }
}
