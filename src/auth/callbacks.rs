//! Lifecycle callbacks fired when the SDK learns new session values.
//!
//! Each callback is an optional, typed handler slot. Handlers run
//! synchronously right after the Session Context has been updated, so a
//! handler reading [`ShoplyClient::context`](crate::ShoplyClient::context)
//! observes the new value.

use std::fmt;
use std::sync::Arc;

use crate::resources::{Cart, User};

/// A shareable handler invoked with a borrowed value.
///
/// Two handlers compare equal only when they wrap the same function instance.
pub struct Handler<T: ?Sized>(Arc<dyn Fn(&T) + Send + Sync>);

impl<T: ?Sized> Handler<T> {
    /// Wraps a function as a handler.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    /// Invokes the handler.
    pub fn call(&self, value: &T) {
        (self.0)(value);
    }
}

impl<T: ?Sized> Clone for Handler<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Handler<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// The set of lifecycle callbacks.
///
/// # Example
///
/// ```rust
/// use shoply_sdk::SessionCallbacks;
///
/// let callbacks = SessionCallbacks::new()
///     .on_access_token(|token| println!("new access token ({} bytes)", token.len()))
///     .on_cart(|cart| println!("cart has {} items", cart.items.len()));
///
/// assert!(callbacks.on_refresh_token.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionCallbacks {
    /// Fired when a new access token becomes known.
    pub on_access_token: Option<Handler<str>>,
    /// Fired when a new refresh token becomes known.
    pub on_refresh_token: Option<Handler<str>>,
    /// Fired when a user object becomes known.
    pub on_user: Option<Handler<User>>,
    /// Fired when a user id becomes known.
    pub on_user_id: Option<Handler<str>>,
    /// Fired when a cart becomes known.
    pub on_cart: Option<Handler<Cart>>,
}

impl SessionCallbacks {
    /// Creates an empty set of callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token callback.
    #[must_use]
    pub fn on_access_token<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_access_token = Some(Handler::new(handler));
        self
    }

    /// Sets the refresh token callback.
    #[must_use]
    pub fn on_refresh_token<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_refresh_token = Some(Handler::new(handler));
        self
    }

    /// Sets the user callback.
    #[must_use]
    pub fn on_user<F>(mut self, handler: F) -> Self
    where
        F: Fn(&User) + Send + Sync + 'static,
    {
        self.on_user = Some(Handler::new(handler));
        self
    }

    /// Sets the user id callback.
    #[must_use]
    pub fn on_user_id<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_user_id = Some(Handler::new(handler));
        self
    }

    /// Sets the cart callback.
    #[must_use]
    pub fn on_cart<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Cart) + Send + Sync + 'static,
    {
        self.on_cart = Some(Handler::new(handler));
        self
    }
}

// Verify SessionCallbacks is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionCallbacks>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_handler_invokes_wrapped_function() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler: Handler<str> = Handler::new(move |value: &str| {
            sink.lock().unwrap().push(value.to_string());
        });

        handler.call("a");
        handler.call("b");

        assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_callbacks_builder_sets_slots() {
        let callbacks = SessionCallbacks::new()
            .on_access_token(|_| {})
            .on_user_id(|_| {});

        assert!(callbacks.on_access_token.is_some());
        assert!(callbacks.on_user_id.is_some());
        assert!(callbacks.on_refresh_token.is_none());
        assert!(callbacks.on_user.is_none());
        assert!(callbacks.on_cart.is_none());
    }

    #[test]
    fn test_cloned_callbacks_compare_equal() {
        let callbacks = SessionCallbacks::new().on_cart(|_| {});
        assert_eq!(callbacks.clone(), callbacks);
        assert_ne!(SessionCallbacks::new().on_cart(|_| {}), callbacks);
    }
}
