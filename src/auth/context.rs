//! Session Context: what the SDK currently knows about the session.
//!
//! The [`SessionStore`] is owned by a [`ShoplyClient`](crate::ShoplyClient)
//! and holds the last-known user id, user, cart and tokens. It starts empty
//! and changes only through [`SessionStore::commit`], which is called after
//! successful identity and cart calls and after a token refresh.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::auth::SessionCallbacks;
use crate::config::redact;
use crate::resources::{Cart, User};

/// A snapshot of the session state.
#[derive(Clone, Default, PartialEq)]
pub struct SessionContext {
    /// Id used for cart operations. The user's id when logged in, otherwise
    /// an anonymous id issued by the server.
    pub user_id: Option<String>,
    /// The logged-in user.
    pub user: Option<User>,
    /// The current cart.
    pub cart: Option<Cart>,
    /// The last access token returned by the server.
    pub access_token: Option<String>,
    /// The last refresh token returned by the server.
    pub refresh_token: Option<String>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("user_id", &self.user_id)
            .field("user", &self.user)
            .field("cart", &self.cart)
            .field("access_token", &redact(self.access_token.as_ref()))
            .field("refresh_token", &redact(self.refresh_token.as_ref()))
            .finish()
    }
}

/// A change to a single context field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the current value as is.
    #[default]
    Unchanged,
    /// Replace the current value.
    Set(T),
    /// Remove the current value.
    Clear,
}

impl<T> FieldUpdate<T> {
    /// `Set` for `Some`, `Clear` for `None`.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }

    /// `Set` for `Some`, `Unchanged` for `None`.
    pub fn set_if_some(value: Option<T>) -> Self {
        value.map_or(Self::Unchanged, Self::Set)
    }

    fn apply(self, target: &mut Option<T>) -> Option<&T> {
        match self {
            Self::Unchanged => None,
            Self::Clear => {
                *target = None;
                None
            }
            Self::Set(value) => {
                *target = Some(value);
                target.as_ref()
            }
        }
    }
}

/// A shallow merge-update for the [`SessionContext`].
#[derive(Clone, Debug, Default)]
pub struct ContextUpdate {
    /// Change to the user id.
    pub user_id: FieldUpdate<String>,
    /// Change to the user.
    pub user: FieldUpdate<User>,
    /// Change to the cart.
    pub cart: FieldUpdate<Cart>,
    /// Change to the access token.
    pub access_token: FieldUpdate<String>,
    /// Change to the refresh token.
    pub refresh_token: FieldUpdate<String>,
}

/// Owner of the mutable [`SessionContext`].
///
/// The lock is held only while merging or copying, never across an `.await`
/// and never while callbacks run.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<SessionContext>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current context.
    #[must_use]
    pub fn snapshot(&self) -> SessionContext {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merges `update` into the context, then fires the callbacks for every
    /// field that received a new value.
    pub fn commit(&self, update: ContextUpdate, callbacks: &SessionCallbacks) {
        let fresh = {
            let mut context = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            let fresh = SessionContext {
                user_id: update.user_id.apply(&mut context.user_id).cloned(),
                user: update.user.apply(&mut context.user).cloned(),
                cart: update.cart.apply(&mut context.cart).cloned(),
                access_token: update.access_token.apply(&mut context.access_token).cloned(),
                refresh_token: update
                    .refresh_token
                    .apply(&mut context.refresh_token)
                    .cloned(),
            };
            drop(context);
            fresh
        };

        notify(&fresh, callbacks);
    }
}

fn notify(fresh: &SessionContext, callbacks: &SessionCallbacks) {
    if let (Some(token), Some(handler)) = (&fresh.access_token, &callbacks.on_access_token) {
        handler.call(token);
    }
    if let (Some(token), Some(handler)) = (&fresh.refresh_token, &callbacks.on_refresh_token) {
        handler.call(token);
    }
    if let (Some(user), Some(handler)) = (&fresh.user, &callbacks.on_user) {
        handler.call(user);
    }
    if let (Some(user_id), Some(handler)) = (&fresh.user_id, &callbacks.on_user_id) {
        handler.call(user_id);
    }
    if let (Some(cart), Some(handler)) = (&fresh.cart, &callbacks.on_cart) {
        handler.call(cart);
    }
}

// Verify SessionStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionStore>();
};
