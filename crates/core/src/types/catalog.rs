//! Catalog records loaded from the storefront's static data files.
//!
//! These are read-only reference data. Selection lists snapshot or refer to
//! products by [`ProductId`] but never own them.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{CurrencyFormat, DEFAULT_CURRENCY_SYMBOL, DigitGrouping, discounted_price};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub price: Decimal,
    /// Discount percentage (0-100). Absent means no discount.
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    /// Specification table in source order.
    #[serde(default)]
    pub specs: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// First image reference, used for thumbnails and cart snapshots.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Unit price after discount.
    #[must_use]
    pub fn sale_price(&self) -> Decimal {
        discounted_price(self.price, self.discount)
    }

    /// Display value of a spec entry.
    ///
    /// Missing, null, empty, `false` and zero values all count as absent.
    #[must_use]
    pub fn spec_value(&self, key: &str) -> Option<String> {
        match self.specs.get(key)? {
            serde_json::Value::Null | serde_json::Value::Bool(false) => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// A brand shown in the brand filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// A product category shown in the category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub name: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub location: String,
    /// Star rating out of five.
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub comment: String,
}

/// A featured release promoted in the hero area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub product_id: ProductId,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub hero_title: String,
    #[serde(default)]
    pub hero_subtitle: String,
}

/// Store contact channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Contact {
    /// Digits of the messaging number, or `None` if it has none.
    #[must_use]
    pub fn whatsapp_digits(&self) -> Option<String> {
        let digits: String = self
            .whatsapp
            .as_deref()?
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        (!digits.is_empty()).then_some(digits)
    }
}

/// Site-wide presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub site_name: String,
    #[serde(default)]
    pub site_short: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub number_grouping: DigitGrouping,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub hero_taglines: Vec<String>,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Settings {
    /// Currency policy derived from these settings.
    #[must_use]
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone(), self.number_grouping)
    }
}
