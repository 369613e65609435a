//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Catalog identifiers
//! are opaque strings (e.g. `"iphone-15-pro"`), so the wrappers hold a
//! `String` rather than a numeric key.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use handset_hub_core::define_id;
/// define_id!(SkuId);
/// define_id!(ReviewId);
///
/// let sku = SkuId::new("a-1");
/// let review = ReviewId::new("a-1");
///
/// // These are different types, so this won't compile:
/// // let _: SkuId = review;
/// assert_eq!(sku.as_str(), review.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_serializes_transparently() {
        let id = ProductId::new("pixel-8");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"pixel-8\"");

        let parsed: ProductId = serde_json::from_str("\"pixel-8\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_product_id_display_and_conversions() {
        let id = ProductId::from("galaxy-s24");
        assert_eq!(id.to_string(), "galaxy-s24");
        assert_eq!(id.as_str(), "galaxy-s24");
        assert_eq!(String::from(id), "galaxy-s24");
    }
}
