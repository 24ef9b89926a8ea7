//! Cart

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building cart lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The line has no product id.
    #[error("cart line {0} has an empty product id")]
    EmptyProductId(usize),

    /// The line quantity is zero.
    #[error("cart line {0} must have a quantity of at least 1")]
    ZeroQuantity(usize),

    /// The line unit price is below zero.
    #[error("cart line {0} has a negative unit price")]
    NegativePrice(usize),
}

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    product_id: String,
    quantity: u32,
    unit_price: Decimal,
}

impl CartItem {
    /// Create a cart line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the product id is empty, the quantity is zero or the
    /// unit price is negative. The reported line index is always `0`; [`Cart::new`]
    /// rebuilds the error with the position of the offending line.
    pub fn new(
        product_id: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<Self, CartError> {
        let product_id = product_id.into();

        if product_id.trim().is_empty() {
            return Err(CartError::EmptyProductId(0));
        }

        if quantity == 0 {
            return Err(CartError::ZeroQuantity(0));
        }

        if unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice(0));
        }

        Ok(Self {
            product_id,
            quantity,
            unit_price,
        })
    }

    /// Return the product id.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Return the quantity.
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Return the unit price.
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Quantity multiplied by unit price, or `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    fn reindexed(error: CartError, index: usize) -> CartError {
        match error {
            CartError::EmptyProductId(_) => CartError::EmptyProductId(index),
            CartError::ZeroQuantity(_) => CartError::ZeroQuantity(index),
            CartError::NegativePrice(_) => CartError::NegativePrice(index),
        }
    }
}

/// An ordered list of cart lines. Lines are not merged by product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Build a cart from `(product_id, quantity, unit_price)` tuples.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] naming the first invalid line.
    pub fn new<P>(lines: impl IntoIterator<Item = (P, u32, Decimal)>) -> Result<Self, CartError>
    where
        P: Into<String>,
    {
        let items = lines
            .into_iter()
            .enumerate()
            .map(|(index, (product_id, quantity, unit_price))| {
                CartItem::new(product_id, quantity, unit_price)
                    .map_err(|error| CartItem::reindexed(error, index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { items })
    }

    /// Iterate over the cart lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Iterate over the lines for a given product.
    pub fn lines_for<'a>(&'a self, product_id: &'a str) -> impl Iterator<Item = &'a CartItem> {
        self.items
            .iter()
            .filter(move |item| item.product_id == product_id)
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every line total, or `None` on overflow. An empty cart totals zero.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}
