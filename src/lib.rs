//! # Shoply Storefront SDK
//!
//! A Rust SDK for the Shoply storefront API, providing type-safe
//! configuration, credential handling and an authenticated request pipeline
//! for shop frontends and backends.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ShoplyConfig`] and [`ShoplyConfigBuilder`]
//! - Per-call overrides via [`RequestConfig`] and runtime updates via [`ConfigUpdate`]
//! - Credential resolution from explicit values, getters and the session context
//! - Transparent refresh of expired access tokens, with a single replay
//! - A uniform error type, [`ShoplyRequestError`], for every call
//! - A session context holding the current user, cart and tokens
//! - User, cart and order calls via [`resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shoply_sdk::{ApiVersion, BaseUrl, ShoplyClient, ShoplyConfig};
//!
//! let config = ShoplyConfig::builder()
//!     .base_url(BaseUrl::new("https://api.my-store.shoply.io").unwrap())
//!     .version(ApiVersion::V1)
//!     .lang("en")
//!     .build()
//!     .unwrap();
//!
//! let client = ShoplyClient::new(config).unwrap();
//! assert!(client.context().user.is_none());
//! ```
//!
//! ## Credentials
//!
//! Access and refresh tokens are resolved per call, first match wins:
//!
//! 1. the per-call [`RequestConfig`]
//! 2. the explicit value on [`ShoplyConfig`]
//! 3. the getter on [`ShoplyConfig`]
//! 4. the session context, filled by `login` and token refreshes
//!
//! Getters let applications keep tokens in their own storage:
//!
//! ```rust
//! use shoply_sdk::{BaseUrl, ShoplyConfig, SessionCallbacks, ValueGetter};
//!
//! let config = ShoplyConfig::builder()
//!     .base_url(BaseUrl::new("https://api.my-store.shoply.io").unwrap())
//!     .access_token_getter(ValueGetter::new(|| std::env::var("SHOPLY_ACCESS_TOKEN").ok()))
//!     .callbacks(SessionCallbacks::new().on_access_token(|token| {
//!         // persist the refreshed token
//!         let _ = token;
//!     }))
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use shoply_sdk::resources::{AddCartItemRequest, LoginUserRequest};
//! use shoply_sdk::RequestConfig;
//!
//! let login = client
//!     .users()
//!     .login(LoginUserRequest::new("ana@example.com", "secret"), None)
//!     .await?;
//!
//! let response = client
//!     .cart()
//!     .add_item(
//!         AddCartItemRequest::new("p-1", 2),
//!         Some(RequestConfig::new().lang("de")),
//!     )
//!     .await?;
//! ```
//!
//! ## Errors
//!
//! Construction and [`ShoplyClient::set_config`] return [`ConfigError`].
//! Every API call returns [`ShoplyResult`]; an inactive store is reported
//! with status `401` and [`ShoplyRequestError::is_inactive`] set.
//!
//! ## Design Principles
//!
//! - **No global state**: each [`ShoplyClient`] owns its configuration and context
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio async runtime

pub mod auth;
mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use auth::{SessionCallbacks, SessionContext};
pub use client::ShoplyClient;
pub use clients::{ShoplyRequestError, ShoplyResult};
pub use config::{
    ApiVersion, BaseUrl, ConfigUpdate, RequestConfig, ShoplyConfig, ShoplyConfigBuilder,
    ValueGetter,
};
pub use error::ConfigError;
