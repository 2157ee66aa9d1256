//! Order-intent models.
//!
//! An order intent is what the storefront forwards to the order webhook in
//! place of a real checkout: who is asking, how to reach them, a human
//! readable summary of the items and the amount due.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use ebooks_core::{Book, LineItem, PhoneError, PhoneNumber};

/// Errors raised while building an order intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Name is required")]
    MissingName,

    #[error("Invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("Cart is empty")]
    EmptyCart,
}

/// Identity fields entered by the customer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
}

/// A validated order intent, ready to be relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIntent {
    pub name: String,
    pub phone: PhoneNumber,
    pub items: String,
    pub total_amount: Decimal,
}

impl OrderIntent {
    /// Build an intent for every line in a cart.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if `items` is empty, or a validation
    /// error if the form is incomplete.
    pub fn for_cart(form: &OrderForm, items: &[LineItem]) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let (name, phone) = validate(form)?;
        Ok(Self {
            name,
            phone,
            items: summarize_cart(items),
            total_amount: items.iter().map(LineItem::line_total).sum(),
        })
    }

    /// Build an intent for a single book bought directly from the catalog.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the form is incomplete.
    pub fn for_book(form: &OrderForm, book: &Book) -> Result<Self, OrderError> {
        let (name, phone) = validate(form)?;
        Ok(Self {
            name,
            phone,
            items: format!("{} - ${:.2}", book.title, to_cents(book.price)),
            total_amount: book.price,
        })
    }

    /// The wire payload for this intent, stamped with `timestamp`.
    #[must_use]
    pub fn payload(&self, timestamp: DateTime<Utc>) -> OrderPayload {
        OrderPayload {
            name: self.name.clone(),
            phone: self.phone.as_str().to_owned(),
            items: self.items.clone(),
            timestamp,
            total_amount: self.total_amount,
        }
    }
}

/// JSON body posted to the order webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub name: String,
    pub phone: String,
    pub items: String,
    pub timestamp: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

/// One line per item: `"{title} (Qty: {n}) - ${line_total}"`, comma separated.
#[must_use]
pub fn summarize_cart(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "{} (Qty: {}) - ${:.2}",
                item.book.title,
                item.quantity,
                to_cents(item.line_total())
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn validate(form: &OrderForm) -> Result<(String, PhoneNumber), OrderError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(OrderError::MissingName);
    }
    let phone = PhoneNumber::parse(&form.phone)?;
    Ok((name.to_owned(), phone))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use ebooks_core::{BookId, Cart, CartAction, Catalog};

    use super::*;

    fn form() -> OrderForm {
        OrderForm {
            name: "  Priya  ".to_owned(),
            phone: "(555) 123-4567".to_owned(),
        }
    }

    fn cart() -> Cart {
        let catalog = Catalog::builtin();
        let art = catalog.get(BookId::new(1)).cloned().unwrap();
        let ai = catalog.get(BookId::new(4)).cloned().unwrap();
        Cart::new()
            .reduce(CartAction::AddItem(art.clone()))
            .reduce(CartAction::AddItem(art))
            .reduce(CartAction::AddItem(ai))
    }

    #[test]
    fn test_summarize_cart() {
        assert_eq!(
            summarize_cart(cart().items()),
            "The Art of Programming (Qty: 2) - $59.98, The Future of AI (Qty: 1) - $34.99"
        );
    }

    #[test]
    fn test_for_cart_totals_and_trims_name() {
        let intent = OrderIntent::for_cart(&form(), cart().items()).unwrap();
        assert_eq!(intent.name, "Priya");
        assert_eq!(intent.phone.as_str(), "5551234567");
        assert_eq!(intent.total_amount, Decimal::new(9497, 2));
    }

    #[test]
    fn test_for_cart_rejects_empty_cart() {
        assert_eq!(
            OrderIntent::for_cart(&form(), &[]),
            Err(OrderError::EmptyCart)
        );
    }

    #[test]
    fn test_for_book_summary() {
        let book = Catalog::builtin().get(BookId::new(3)).cloned().unwrap();
        let intent = OrderIntent::for_book(&form(), &book).unwrap();
        assert_eq!(intent.items, "Mindful Living - $19.99");
        assert_eq!(intent.total_amount, Decimal::new(1999, 2));
    }

    #[test]
    fn test_for_book_summary_always_shows_cents() {
        let mut book = Catalog::builtin().get(BookId::new(2)).cloned().unwrap();
        book.price = Decimal::from(25);
        let whole = OrderIntent::for_book(&form(), &book).unwrap();
        assert_eq!(whole.items, "Digital Marketing Mastery - $25.00");

        book.price = Decimal::new(29_905, 3);
        let fractional = OrderIntent::for_book(&form(), &book).unwrap();
        assert_eq!(fractional.items, "Digital Marketing Mastery - $29.91");
        assert_eq!(fractional.total_amount, Decimal::new(29_905, 3));
    }

    #[test]
    fn test_validation_errors() {
        let blank_name = OrderForm {
            name: "   ".to_owned(),
            ..form()
        };
        assert_eq!(
            OrderIntent::for_cart(&blank_name, cart().items()),
            Err(OrderError::MissingName)
        );

        let short_phone = OrderForm {
            phone: "12345".to_owned(),
            ..form()
        };
        assert!(matches!(
            OrderIntent::for_cart(&short_phone, cart().items()),
            Err(OrderError::InvalidPhone(PhoneError::TooShort { got: 5, .. }))
        ));
    }

    #[test]
    fn test_payload_json_shape() {
        let intent = OrderIntent::for_cart(&form(), cart().items()).unwrap();
        let timestamp = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let json = serde_json::to_value(intent.payload(timestamp)).unwrap();

        assert_eq!(json["name"], "Priya");
        assert_eq!(json["phone"], "5551234567");
        assert_eq!(json["timestamp"], "2025-03-14T09:26:53Z");
        assert!((json["totalAmount"].as_f64().unwrap() - 94.97).abs() < 1e-9);
    }
}
