//! Shoply API resources.
//!
//! Resource calls are reached through accessors on
//! [`ShoplyClient`](crate::ShoplyClient):
//!
//! - [`UsersResource`]: register, login, logout, verify, profile
//! - [`CartResource`]: get, add, remove, clear
//! - [`OrdersResource`]: create, get
//!
//! Every call accepts an optional [`RequestConfig`](crate::RequestConfig)
//! that overrides the global configuration for that call only.

mod cart;
mod models;
mod orders;
mod users;

pub use cart::{AddCartItemRequest, CartResource, CartResponse, RemoveCartItemRequest};
pub use models::{
    Cart, CartItem, Image, LocalizedText, Order, OrderContact, OrderItem, OrderProduct,
    OrderStatus, User, UserAddress,
};
pub use orders::{CreateOrderRequest, CreateOrderResponse, OrdersResource};
pub use users::{
    LoginResponse, LoginUserRequest, RegisterUserRequest, UserResponse, UsersResource,
    VerifyResponse,
};

/// Serializes a request body. Request types only hold strings, numbers and
/// options, so serialization cannot fail in practice.
pub(crate) fn to_body<T: serde::Serialize>(body: &T) -> serde_json::Value {
    serde_json::to_value(body).unwrap_or(serde_json::Value::Null)
}
