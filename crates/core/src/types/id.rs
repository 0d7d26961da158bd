//! Newtype ids for every entity the storefront persists.
//!
//! Ids are plain `i32` rows underneath, but each entity gets its own wrapper
//! type so a `ReviewId` can never slip into a query that wanted a
//! `ProductId`. New entity ids are declared with [`define_id!`].

/// Declare a newtype id wrapper over `i32`.
///
/// The generated type serializes transparently as its number, displays as its
/// number, and (with the `postgres` feature) binds and decodes as `INTEGER`
/// through sqlx's transparent derive.
///
/// ```
/// # use saltbloom_core::define_id;
/// define_id!(ProductId);
/// define_id!(ReviewId);
///
/// let product = ProductId::new(7);
/// assert_eq!(product.as_i32(), 7);
/// assert_eq!(product.to_string(), "7");
///
/// // Different wrappers are different types; this would not compile:
/// // let _: ProductId = ReviewId::new(7);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type))]
        #[cfg_attr(feature = "postgres", sqlx(transparent))]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw database id.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// The raw database id.
            #[must_use]
            pub const fn as_i32(self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(ReviewId);
define_id!(AddressId);
define_id!(SubscriptionId);
define_id!(InquiryId);
define_id!(RewardsAccountId);
define_id!(RewardsEntryId);
