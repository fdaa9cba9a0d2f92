//! HTTP plumbing for Shoply API communication.
//!
//! This module holds the request pipeline that every SDK call goes through:
//!
//! - [`ApiRequest`]: a single call (method, path, body, query, per-call override)
//! - [`HttpClient`]: the transport adapter that prepares and sends requests
//! - [`AuthRefresh`]: refreshes an expired access token and replays once
//! - [`normalize`]: turns the transport outcome into a [`ShoplyResult`]
//!
//! Most applications never use these types directly and call the resource
//! methods on [`ShoplyClient`](crate::ShoplyClient) instead. For endpoints the
//! SDK does not wrap, build an [`ApiRequest`] and pass it to
//! [`ShoplyClient::request`](crate::ShoplyClient::request):
//!
//! ```rust,ignore
//! use shoply_sdk::clients::{ApiRequest, HttpMethod};
//!
//! let request = ApiRequest::builder(HttpMethod::Get, "/products")
//!     .query_param("page", "2")
//!     .build();
//!
//! let products: serde_json::Value = client.request(request).await?;
//! ```
//!
//! # Expired Tokens
//!
//! When the server answers with the expired-token status (`418` unless
//! configured otherwise), the refresh token is exchanged at
//! `POST /users/refresh`, the new tokens are stored in the session context and
//! the original request is replayed exactly once.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod interceptor;
mod normalizer;

pub use errors::TransportError;
pub use http_client::{Attempt, HttpClient, PreparedRequest, IS_BROWSER, SDK_VERSION};
pub use http_request::{ApiRequest, ApiRequestBuilder, HttpMethod};
pub use http_response::HttpResponse;
pub use interceptor::AuthRefresh;
pub use normalizer::{
    normalize, ShoplyRequestError, ShoplyResult, CLIENT_ERROR_MESSAGE, CONFIG_ERROR_MESSAGE,
    SERVER_ERROR_MESSAGE, STORE_INACTIVE_MESSAGE,
};
