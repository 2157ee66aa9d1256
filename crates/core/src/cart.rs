//! Cart line items and the cart reducer.
//!
//! [`Cart::reduce`] is the only way cart contents change. It is a pure
//! function of the current cart and a [`CartAction`], which keeps two
//! invariants:
//!
//! - at most one line item per [`BookId`]
//! - every line item has `quantity >= 1`
//!
//! Totals are never stored; [`Cart::total`] and [`Cart::item_count`] are
//! recomputed from the items on every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Book;
use crate::types::BookId;

/// A book in the cart along with how many copies were requested.
///
/// Serializes as a flat object: the book's fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub book: Book,
    pub quantity: u32,
}

impl LineItem {
    /// A new line item with a quantity of one.
    #[must_use]
    pub const fn new(book: Book) -> Self {
        Self { book, quantity: 1 }
    }

    #[must_use]
    pub const fn id(&self) -> BookId {
        self.book.id
    }

    /// Unit price multiplied by quantity, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.book.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A state transition request for the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one copy of a book, inserting a new line at the end if needed.
    AddItem(Book),
    /// Remove the line for a book. No-op if absent.
    RemoveItem(BookId),
    /// Set a line's quantity exactly. `quantity <= 0` removes the line.
    UpdateQuantity { id: BookId, quantity: i64 },
    /// Remove every line.
    ClearCart,
    /// Replace the contents wholesale (hydration from a snapshot).
    LoadCart(Vec<LineItem>),
}

/// Cart contents in first-add order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from line items, enforcing the cart invariants.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self::new().reduce(CartAction::LoadCart(items))
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price * quantity` over all lines, saturating at the `Decimal`
    /// bounds.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Apply an action and return the resulting cart.
    #[must_use]
    pub fn reduce(mut self, action: CartAction) -> Self {
        match action {
            CartAction::AddItem(book) => {
                if let Some(existing) = self.items.iter_mut().find(|item| item.id() == book.id) {
                    existing.quantity = existing.quantity.saturating_add(1);
                } else {
                    self.items.push(LineItem::new(book));
                }
            }
            CartAction::RemoveItem(id) => {
                self.items.retain(|item| item.id() != id);
            }
            CartAction::UpdateQuantity { id, quantity } => {
                if quantity <= 0 {
                    self.items.retain(|item| item.id() != id);
                } else if let Some(existing) = self.items.iter_mut().find(|item| item.id() == id)
                {
                    existing.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                }
            }
            CartAction::ClearCart => self.items.clear(),
            CartAction::LoadCart(items) => {
                // Snapshots come from outside the process; drop lines that
                // would break the invariants rather than trusting them.
                let mut loaded: Vec<LineItem> = Vec::with_capacity(items.len());
                let mut total = Decimal::ZERO;
                for item in items {
                    if item.quantity == 0
                        || item.book.price < Decimal::ZERO
                        || loaded.iter().any(|l| l.id() == item.id())
                    {
                        continue;
                    }
                    let Some(next_total) = item
                        .book
                        .price
                        .checked_mul(Decimal::from(item.quantity))
                        .and_then(|line| total.checked_add(line))
                    else {
                        continue;
                    };
                    total = next_total;
                    loaded.push(item);
                }
                self.items = loaded;
            }
        }
        self
    }
}
