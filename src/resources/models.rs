//! Shared data models for Shoply API resources.
//!
//! Field names follow the API's camelCase JSON; identifiers sent as `_id`
//! are exposed as `id`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text that is either resolved for one language or, with `skip_transform`,
/// keyed by language code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LocalizedText {
    /// Text in the requested (or store default) language.
    Plain(String),
    /// Text per language code.
    Translations(BTreeMap<String, String>),
}

impl LocalizedText {
    /// Returns the text for `lang`, or the plain text if not translated.
    #[must_use]
    pub fn get(&self, lang: &str) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Translations(map) => map.get(lang).map(String::as_str),
        }
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

/// A stored image.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Storage identifier.
    #[serde(rename = "_uuid")]
    pub uuid: String,
    /// Path relative to the store's media host.
    pub path: String,
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Low resolution placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether the image is animated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_gif: Option<bool>,
}

/// A postal address attached to a user.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserAddress {
    /// Country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Region or state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Street and house number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

/// A registered store user.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Full name.
    pub name: String,
    /// Login email address.
    pub email: String,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Preferred language code.
    pub lang: String,
    /// Default address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<UserAddress>,
    /// Whether the email address has been confirmed.
    #[serde(default)]
    pub email_is_verified: bool,
}

/// A product line in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Cart line identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Product in this line.
    pub product_id: String,
    /// Product SKU.
    pub sku: String,
    /// EAN barcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ean_code: Option<String>,
    /// Product name.
    pub name: LocalizedText,
    /// Product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Units in the cart.
    pub quantity: u32,
    /// Unit price after discounts.
    pub price: f64,
    /// Unit price before discounts.
    pub regular_price: f64,
    /// VAT rate in percent.
    #[serde(default)]
    pub vat_rate: f64,
    /// Sales unit, `pc` unless set.
    #[serde(default = "default_sales_unit")]
    pub sales_unit: String,
}

fn default_sales_unit() -> String {
    "pc".to_string()
}

/// A shopping cart.
///
/// Carts are addressed by `user_id`, which is assigned by the server on the
/// first cart operation, also for anonymous shoppers.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owner of the cart.
    pub user_id: String,
    /// Cart lines.
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Returns the total number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Returns the sum of `price * quantity` across all items.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum()
    }
}

/// Billing or shipping contact of an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OrderContact {
    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Street and house number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// Product snapshot stored on an order line.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OrderProduct {
    /// Product identifier.
    pub id: String,
    /// Product name at order time.
    pub name: LocalizedText,
    /// Product SKU.
    pub sku: String,
    /// Thumbnail image, as stored by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<serde_json::Value>,
}

/// A product line in an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Ordered product.
    pub product: OrderProduct,
    /// Ordered units.
    pub quantity: u32,
    /// Unit price paid.
    pub price: f64,
    /// Unit price before discounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<f64>,
    /// VAT rate in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
    /// Sales unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_unit: Option<String>,
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed and awaiting payment or fulfilment.
    #[default]
    Pending,
    /// Paid and fulfilled.
    Completed,
    /// Cancelled by the shopper or the store.
    Cancelled,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Human readable order number.
    pub order_number: String,
    /// Billing contact.
    pub billing_data: OrderContact,
    /// Shipping contact.
    pub shipping_data: OrderContact,
    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Platform the order was placed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Current status.
    pub status: OrderStatus,
    /// Sum of the lines before shipping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    /// Shipping cost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    /// Amount charged.
    pub total: f64,
    /// Client-side order reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}
