//! Cart line items and the product attributes that create them.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product attributes handed to the cart by the catalog or quick view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Create a product without an image.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: None,
        }
    }

    /// Attach an image URI.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// One product entry in the cart.
///
/// This is also the snapshot record: it serializes to
/// `{"productId", "name", "price", "image"?, "quantity"}`. Records written
/// by older pages under `id` instead of `productId` are still accepted.
///
/// `quantity` is a `NonZeroU32`, so a stored zero fails to deserialize
/// instead of producing an empty line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// A fresh line for `product` with quantity 1.
    #[must_use]
    pub fn from_product(product: Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: NonZeroU32::MIN,
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity.get())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn candle() -> Product {
        Product::new(
            ProductId::parse("p1").unwrap(),
            "Candle A",
            Price::from_cents(1250),
        )
        .with_image("img1")
    }

    #[test]
    fn test_from_product_starts_at_one() {
        let line = LineItem::from_product(candle());
        assert_eq!(line.quantity.get(), 1);
        assert_eq!(line.image.as_deref(), Some("img1"));
    }

    #[test]
    fn test_line_total() {
        let mut line = LineItem::from_product(candle());
        line.quantity = NonZeroU32::new(3).unwrap();
        assert_eq!(line.line_total(), Price::from_cents(3750));
    }

    #[test]
    fn test_serialized_field_names() {
        let line = LineItem::from_product(candle());
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["productId"], "p1");
        assert_eq!(value["name"], "Candle A");
        assert_eq!(value["price"], 12.5);
        assert_eq!(value["image"], "img1");
        assert_eq!(value["quantity"], 1);
    }

    #[test]
    fn test_image_omitted_when_absent() {
        let mut line = LineItem::from_product(candle());
        line.image = None;
        let json = serde_json::to_string(&line).unwrap();
        assert!(!json.contains("image"));
    }

    #[test]
    fn test_accepts_legacy_id_field() {
        let json = r#"{"id":"p9","name":"Old","price":4,"quantity":2}"#;
        let line: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.product_id.as_str(), "p9");
        assert_eq!(line.quantity.get(), 2);
        assert!(line.image.is_none());
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let json = r#"{"productId":"p1","name":"A","price":1,"quantity":0}"#;
        assert!(serde_json::from_str::<LineItem>(json).is_err());
    }
}
