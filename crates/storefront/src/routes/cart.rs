//! Cart route handlers.
//!
//! Carts belong to anonymous visitor tokens carried in the `X-Cart-Token`
//! header. Every mutation persists the cart before responding, and the
//! response carries both the updated cart view and the notifications the
//! operation raised so the frontend can show them as toasts.

use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use saltbloom_cart::{
    AddOutcome, BufferingNotifier, CartObserver, KeyValueStore, LineItem, Notification,
    RemoveOutcome, UpdateOutcome,
};
use saltbloom_core::{ProductId, display_usd};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// The HTTP header carrying the visitor's cart token.
pub const CART_TOKEN_HEADER: &str = "x-cart-token";

/// Extractor for the visitor's cart token.
///
/// The frontend mints a UUID on first visit, keeps it in local storage, and
/// sends it on every cart request. Requests without a valid token are
/// rejected with 400.
#[derive(Debug, Clone, Copy)]
pub struct CartToken(pub Uuid);

impl<S> FromRequestParts<S> for CartToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let value = parts
            .headers
            .get(CART_TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("missing X-Cart-Token header".to_string()))?;

        let token = Uuid::parse_str(value)
            .map_err(|_| AppError::BadRequest("X-Cart-Token must be a UUID".to_string()))?;

        Ok(Self(token))
    }
}

// =============================================================================
// View Types
// =============================================================================

/// One cart line as returned to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub image: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            image: item.image.clone(),
            category: item.category.clone(),
            line_total: item.line_total(),
        }
    }
}

/// Cart state as returned to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub subtotal_display: String,
}

impl CartView {
    fn from_cart<S: KeyValueStore, O: CartObserver>(cart: &saltbloom_cart::Cart<S, O>) -> Self {
        let subtotal = cart.subtotal();
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            subtotal,
            subtotal_display: display_usd(subtotal),
        }
    }
}

/// Response body for cart mutations.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    /// What the operation did: `added`, `merged`, `updated`, `rejected`,
    /// `removed`, `not_found`, or `cleared`.
    pub outcome: &'static str,
    pub cart: CartView,
    /// Toasts raised by this operation, in order.
    pub notifications: Vec<Notification>,
}

// =============================================================================
// Request Payloads
// =============================================================================

/// Add to cart payload.
#[derive(Debug, Deserialize)]
pub struct AddItemPayload {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: Option<u32>,
    pub image: String,
    pub category: String,
}

/// Update quantity payload.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityPayload {
    pub id: ProductId,
    pub quantity: u32,
}

/// Remove from cart payload.
#[derive(Debug, Deserialize)]
pub struct RemoveItemPayload {
    pub id: ProductId,
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart for the visitor.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CartToken(token): CartToken,
) -> Result<Json<CartView>> {
    let notifier = BufferingNotifier::default();
    let cart = state.carts().open(token, &notifier)?;

    Ok(Json(CartView::from_cart(&cart)))
}

/// Add an item to the cart.
///
/// Adding a product already in the cart merges quantities instead of
/// creating a second line; the item's stored name, price, image, and
/// category are kept as they were.
#[instrument(skip(state, payload), fields(product_id = payload.id.as_i32()))]
pub async fn add(
    State(state): State<AppState>,
    CartToken(token): CartToken,
    Json(payload): Json<AddItemPayload>,
) -> Result<Json<CartResponse>> {
    let quantity = payload.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
    }

    let item = LineItem {
        id: payload.id,
        name: payload.name,
        price: payload.price,
        quantity,
        image: payload.image,
        category: payload.category,
    };

    let notifier = BufferingNotifier::default();
    let mut cart = state.carts().open(token, &notifier)?;

    let outcome = match cart.add_item(item)? {
        AddOutcome::Added => "added",
        AddOutcome::Merged { .. } => "merged",
    };

    add_breadcrumb(
        "cart",
        "Added item to cart",
        Some(&[("product_id", &payload.id.to_string())]),
    );

    Ok(Json(CartResponse {
        outcome,
        cart: CartView::from_cart(&cart),
        notifications: notifier.drain(),
    }))
}

/// Set the quantity of a cart line.
///
/// Quantities below 1 are rejected rather than treated as removal; the
/// frontend sends an explicit remove for that.
#[instrument(skip(state, payload), fields(product_id = payload.id.as_i32(), quantity = payload.quantity))]
pub async fn update(
    State(state): State<AppState>,
    CartToken(token): CartToken,
    Json(payload): Json<UpdateQuantityPayload>,
) -> Result<Json<CartResponse>> {
    let notifier = BufferingNotifier::default();
    let mut cart = state.carts().open(token, &notifier)?;

    let outcome = match cart.update_quantity(payload.id, payload.quantity)? {
        UpdateOutcome::Updated => "updated",
        UpdateOutcome::Rejected => "rejected",
        UpdateOutcome::NotFound => "not_found",
    };

    Ok(Json(CartResponse {
        outcome,
        cart: CartView::from_cart(&cart),
        notifications: notifier.drain(),
    }))
}

/// Remove a line from the cart.
///
/// Removing an id that is not in the cart is reported as `not_found` but is
/// not an error.
#[instrument(skip(state, payload), fields(product_id = payload.id.as_i32()))]
pub async fn remove(
    State(state): State<AppState>,
    CartToken(token): CartToken,
    Json(payload): Json<RemoveItemPayload>,
) -> Result<Json<CartResponse>> {
    let notifier = BufferingNotifier::default();
    let mut cart = state.carts().open(token, &notifier)?;

    let outcome = match cart.remove_item(payload.id)? {
        RemoveOutcome::Removed(_) => "removed",
        RemoveOutcome::NotFound => "not_found",
    };

    Ok(Json(CartResponse {
        outcome,
        cart: CartView::from_cart(&cart),
        notifications: notifier.drain(),
    }))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    CartToken(token): CartToken,
) -> Result<Json<CartResponse>> {
    let notifier = BufferingNotifier::default();
    let mut cart = state.carts().open(token, &notifier)?;

    cart.clear()?;

    Ok(Json(CartResponse {
        outcome: "cleared",
        cart: CartView::from_cart(&cart),
        notifications: notifier.drain(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use saltbloom_cart::{Cart, CartStorage, MemoryStore};

    fn gray_salt(quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new(3),
            name: "Grey Salt 1kg".to_string(),
            price: Decimal::new(14_25, 2),
            quantity,
            image: "/images/grey-salt.jpg".to_string(),
            category: "coarse".to_string(),
        }
    }

    #[test]
    fn test_cart_view_totals() {
        let mut cart = Cart::open(CartStorage::new(MemoryStore::default())).unwrap();
        cart.add_item(gray_salt(2)).unwrap();

        let view = CartView::from_cart(&cart);

        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, Decimal::new(28_50, 2));
        assert_eq!(view.subtotal_display, "$28.50");
        assert_eq!(view.items[0].line_total, Decimal::new(28_50, 2));
    }

    #[test]
    fn test_cart_view_serializes_prices_as_numbers() {
        let mut cart = Cart::open(CartStorage::new(MemoryStore::default())).unwrap();
        cart.add_item(gray_salt(1)).unwrap();

        let json = serde_json::to_value(CartView::from_cart(&cart)).unwrap();

        assert!(json["subtotal"].is_number());
        assert!(json["items"][0]["price"].is_number());
        assert_eq!(json["subtotal_display"], "$14.25");
    }

    #[test]
    fn test_add_payload_quantity_defaults_to_one() {
        let payload: AddItemPayload = serde_json::from_str(
            r#"{"id": 3, "name": "Grey Salt 1kg", "price": 14.25,
                "image": "/images/grey-salt.jpg", "category": "coarse"}"#,
        )
        .unwrap();

        assert_eq!(payload.quantity, None);
        assert_eq!(payload.quantity.unwrap_or(1), 1);
    }
}
