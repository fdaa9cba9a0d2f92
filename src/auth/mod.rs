//! Authentication state for the Shoply SDK.
//!
//! This module holds everything the request pipeline needs to know about the
//! current session and its credentials.
//!
//! # Overview
//!
//! - [`SessionStore`] / [`SessionContext`]: the last-known user id, user,
//!   cart and tokens, updated through [`SessionStore::commit`]
//! - [`CredentialSource`]: resolves access token, refresh token and user id
//!   from per-call values, global values, getters and the session context
//! - [`SessionCallbacks`]: handlers fired when new session values are learned
//! - [`refresh_tokens`]: exchanges a refresh token for a new token pair
//!
//! # Example
//!
//! ```rust
//! use shoply_sdk::auth::{ContextUpdate, FieldUpdate, SessionStore};
//! use shoply_sdk::SessionCallbacks;
//!
//! let store = SessionStore::new();
//! store.commit(
//!     ContextUpdate {
//!         access_token: FieldUpdate::Set("token".to_string()),
//!         ..ContextUpdate::default()
//!     },
//!     &SessionCallbacks::new(),
//! );
//!
//! assert_eq!(store.snapshot().access_token.as_deref(), Some("token"));
//! ```

mod callbacks;
mod context;
mod credentials;
pub mod refresh;

pub use callbacks::{Handler, SessionCallbacks};
pub use context::{ContextUpdate, FieldUpdate, SessionContext, SessionStore};
pub use credentials::{resolve_first, CredentialSource, Source};
pub use refresh::{refresh_tokens, RefreshError, RefreshedTokens};
