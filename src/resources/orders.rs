//! Order calls.

use serde::{Deserialize, Serialize};

use crate::auth::{ContextUpdate, FieldUpdate};
use crate::clients::{ApiRequest, HttpMethod, ShoplyResult};
use crate::config::RequestConfig;
use crate::resources::{to_body, Cart, Order, OrderContact};
use crate::ShoplyClient;

/// Body of `POST /orders`. The order is placed from the current cart.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Billing contact.
    pub billing_data: OrderContact,
    /// Defaults to the billing data on the server when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_data: Option<OrderContact>,
    /// Customer note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Client-side order reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl CreateOrderRequest {
    /// Creates an order request with billing data only.
    #[must_use]
    pub fn new(billing_data: OrderContact) -> Self {
        Self {
            billing_data,
            ..Self::default()
        }
    }
}

/// Response data of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    /// The placed order.
    pub order: Order,
    /// Identifier of the placed order.
    pub order_id: String,
    /// Owner of the cart the order was placed from.
    pub user_id: String,
    /// The cart after checkout, usually empty.
    pub cart: Cart,
    /// Payment page to send the shopper to, when the payment method has one.
    #[serde(rename = "_redirectUrl", default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Payment form markup to render, when the payment method has one.
    #[serde(rename = "_redirectHtml", default, skip_serializing_if = "Option::is_none")]
    pub redirect_html: Option<String>,
}

/// Order calls, obtained from [`ShoplyClient::orders`].
#[derive(Debug, Clone, Copy)]
pub struct OrdersResource<'a> {
    client: &'a ShoplyClient,
}

impl<'a> OrdersResource<'a> {
    pub(crate) const fn new(client: &'a ShoplyClient) -> Self {
        Self { client }
    }

    /// Places an order from the current cart and stores the emptied cart in
    /// the session context.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails, for example with status 400 for an empty cart.
    pub async fn create(
        &self,
        body: CreateOrderRequest,
        config: Option<RequestConfig>,
    ) -> ShoplyResult<CreateOrderResponse> {
        let request = ApiRequest::builder(HttpMethod::Post, "/orders")
            .body(to_body(&body))
            .maybe_config(config)
            .build();

        let response: CreateOrderResponse = self.client.request(request).await?;
        self.client.commit(ContextUpdate {
            user_id: FieldUpdate::Set(response.user_id.clone()),
            cart: FieldUpdate::Set(response.cart.clone()),
            ..ContextUpdate::default()
        });

        Ok(response)
    }

    /// Fetches a single order.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails, with status 404 for an unknown order.
    pub async fn get(&self, id: &str, config: Option<RequestConfig>) -> ShoplyResult<Order> {
        let request = ApiRequest::builder(HttpMethod::Get, order_path(id))
            .maybe_config(config)
            .build();

        self.client.request(request).await
    }
}

fn order_path(id: &str) -> String {
    format!("/orders/{}", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_path_encodes_identifier() {
        assert_eq!(order_path("o-1"), "/orders/o-1");
        assert_eq!(order_path("a/b c"), "/orders/a%2Fb%20c");
    }

    #[test]
    fn test_create_response_reads_ids_and_optional_redirects() {
        let response: CreateOrderResponse = serde_json::from_value(json!({
            "order": {
                "_id": "o-1",
                "orderNumber": "2024-0001",
                "billingData": {},
                "shippingData": {},
                "status": "pending",
                "total": 9.0,
                "createdAt": "2024-05-01T10:00:00Z",
                "updatedAt": "2024-05-01T10:00:00Z"
            },
            "orderId": "o-1",
            "userId": "u-1",
            "cart": {"_id": "c-1", "userId": "u-1", "items": []}
        }))
        .unwrap();

        assert_eq!(response.order_id, "o-1");
        assert_eq!(response.user_id, "u-1");
        assert!(response.redirect_url.is_none());
        assert!(response.redirect_html.is_none());
    }

    #[test]
    fn test_create_request_serializes_camel_case() {
        let body = CreateOrderRequest::new(OrderContact {
            name: Some("Ana Horvat".to_string()),
            ..OrderContact::default()
        });

        assert_eq!(to_body(&body), json!({"billingData": {"name": "Ana Horvat"}}));
    }
}
