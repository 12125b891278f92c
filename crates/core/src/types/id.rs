//! Newtype IDs for type-safe entity references.
//!
//! Catalog rows are keyed by opaque text identifiers (UUIDs for persisted
//! rows, `demo-N` for the built-in demo catalog), so every ID wraps a `String`.
//! Use the `define_id!` macro to create wrappers that prevent accidentally
//! mixing IDs from different entity types.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use drizzl_core::define_id;
/// define_id!(SupplierId);
/// define_id!(WarehouseId);
///
/// let supplier = SupplierId::new("sup-1");
/// let warehouse = WarehouseId::new("sup-1");
///
/// // These are different types, so this won't compile:
/// // let _: SupplierId = warehouse;
/// assert_eq!(supplier.as_str(), warehouse.as_str());
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

            /// Borrow the underlying identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <String as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <String as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_id!(ProductId);
define_id!(IngredientId);
define_id!(ProductCostId);

/// Prefix reserved for the built-in demo catalog.
pub const DEMO_ID_PREFIX: &str = "demo-";

impl ProductId {
    /// Whether this ID lives in the reserved demo namespace (`demo-*`).
    ///
    /// The prefix alone does not guarantee the demo catalog contains the ID.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.0.starts_with(DEMO_ID_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display_and_conversions() {
        let id = ProductId::new("9f1c2e");
        assert_eq!(id.to_string(), "9f1c2e");
        assert_eq!(id.as_str(), "9f1c2e");
        assert_eq!(String::from(id.clone()), "9f1c2e");
        assert_eq!(ProductId::from("9f1c2e"), id);
    }

    #[test]
    fn test_product_id_demo_namespace() {
        assert!(ProductId::new("demo-1").is_demo());
        assert!(ProductId::new("demo-99").is_demo());
        assert!(!ProductId::new("d3m0-1").is_demo());
        assert!(!ProductId::new("9f1c2e").is_demo());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = IngredientId::new("demo-1-3");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"demo-1-3\"");
    }
}
