//! Cart calls.
//!
//! Carts are addressed by the `userId` query parameter, resolved from the
//! configured user id, the user id getter or the session context. Every
//! successful call stores the returned cart and its user id in the session
//! context, so an anonymous shopper keeps the same cart across calls.

use serde::{Deserialize, Serialize};

use crate::auth::{ContextUpdate, FieldUpdate};
use crate::clients::{ApiRequest, HttpMethod, ShoplyResult};
use crate::config::RequestConfig;
use crate::resources::{to_body, Cart};
use crate::ShoplyClient;

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    /// Product to add.
    pub product_id: String,
    /// Units to add.
    pub quantity: u32,
}

impl AddCartItemRequest {
    /// Creates a request adding `quantity` units of a product.
    #[must_use]
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Body of `POST /cart/remove`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartItemRequest {
    /// Product to remove.
    pub product_id: String,
    /// Units to remove. The whole line is removed when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl RemoveCartItemRequest {
    /// Creates a request removing a whole cart line.
    #[must_use]
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            quantity: None,
        }
    }

    /// Removes only `quantity` units instead of the whole line.
    #[must_use]
    pub const fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// Response data of every cart call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// Owner of the cart, an anonymous id until the shopper logs in.
    pub user_id: String,
    /// The cart after the call.
    pub cart: Cart,
}

/// Cart calls, obtained from [`ShoplyClient::cart`].
#[derive(Debug, Clone, Copy)]
pub struct CartResource<'a> {
    client: &'a ShoplyClient,
}

impl<'a> CartResource<'a> {
    pub(crate) const fn new(client: &'a ShoplyClient) -> Self {
        Self { client }
    }

    /// Fetches the current cart, creating an empty one on first use.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails.
    pub async fn get(&self, config: Option<RequestConfig>) -> ShoplyResult<CartResponse> {
        let request = ApiRequest::builder(HttpMethod::Get, "/cart")
            .maybe_config(config)
            .build();
        self.send(request).await
    }

    /// Adds a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails, for example when the product is out of stock.
    pub async fn add_item(
        &self,
        body: AddCartItemRequest,
        config: Option<RequestConfig>,
    ) -> ShoplyResult<CartResponse> {
        let request = ApiRequest::builder(HttpMethod::Post, "/cart/add")
            .body(to_body(&body))
            .maybe_config(config)
            .build();
        self.send(request).await
    }

    /// Removes a product, or some units of it, from the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails.
    pub async fn remove_item(
        &self,
        body: RemoveCartItemRequest,
        config: Option<RequestConfig>,
    ) -> ShoplyResult<CartResponse> {
        let request = ApiRequest::builder(HttpMethod::Post, "/cart/remove")
            .body(to_body(&body))
            .maybe_config(config)
            .build();
        self.send(request).await
    }

    /// Removes every item from the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails.
    pub async fn clear(&self, config: Option<RequestConfig>) -> ShoplyResult<CartResponse> {
        let request = ApiRequest::builder(HttpMethod::Post, "/cart/clear")
            .maybe_config(config)
            .build();
        self.send(request).await
    }

    async fn send(&self, request: ApiRequest) -> ShoplyResult<CartResponse> {
        let response: CartResponse = self.client.request(request).await?;
        self.client.commit(ContextUpdate {
            user_id: FieldUpdate::Set(response.user_id.clone()),
            cart: FieldUpdate::Set(response.cart.clone()),
            ..ContextUpdate::default()
        });
        Ok(response)
    }
}
