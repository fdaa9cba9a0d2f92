//! Credential resolution.
//!
//! Tokens and the cart user id can come from several places. Each value is
//! resolved by walking an ordered list of sources and taking the first one
//! that yields a non-empty string:
//!
//! | value         | per-call | global | getter | context |
//! |---------------|----------|--------|--------|---------|
//! | access token  | yes      | yes    | yes    | yes     |
//! | refresh token | yes      | yes    | yes    | yes     |
//! | user id       | no       | yes    | yes    | yes     |

use crate::auth::SessionContext;
use crate::config::{RequestConfig, ShoplyConfig, ValueGetter};

/// A single candidate source, evaluated lazily.
pub type Source<'a> = &'a dyn Fn() -> Option<String>;

/// Returns the first non-empty value produced by `sources`, in order.
///
/// Later sources are not evaluated once a value is found, so getters further
/// down the list are only invoked when needed.
///
/// # Example
///
/// ```rust
/// use shoply_sdk::auth::resolve_first;
///
/// let value = resolve_first(&[&|| None, &|| Some(String::new()), &|| Some("x".to_string())]);
/// assert_eq!(value.as_deref(), Some("x"));
/// ```
#[must_use]
pub fn resolve_first(sources: &[Source<'_>]) -> Option<String> {
    sources
        .iter()
        .find_map(|source| source().filter(|value| !value.is_empty()))
}

/// Read-only view over every place a credential can come from.
#[derive(Debug, Clone, Copy)]
pub struct CredentialSource<'a> {
    global: &'a ShoplyConfig,
    request: Option<&'a RequestConfig>,
    context: &'a SessionContext,
}

impl<'a> CredentialSource<'a> {
    /// Creates a credential source over the given layers.
    #[must_use]
    pub const fn new(
        global: &'a ShoplyConfig,
        request: Option<&'a RequestConfig>,
        context: &'a SessionContext,
    ) -> Self {
        Self {
            global,
            request,
            context,
        }
    }

    /// Resolves the access token: per-call, global, getter, context.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        resolve_first(&[
            &|| self.request.and_then(|r| r.access_token.clone()),
            &|| self.global.access_token().map(str::to_string),
            &|| call(self.global.access_token_getter()),
            &|| self.context.access_token.clone(),
        ])
    }

    /// Resolves the refresh token: per-call, global, getter, context.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        resolve_first(&[
            &|| self.request.and_then(|r| r.refresh_token.clone()),
            &|| self.global.refresh_token().map(str::to_string),
            &|| call(self.global.refresh_token_getter()),
            &|| self.context.refresh_token.clone(),
        ])
    }

    /// Resolves the cart user id: global, getter, context.
    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        resolve_first(&[
            &|| self.global.user_id().map(str::to_string),
            &|| call(self.global.user_id_getter()),
            &|| self.context.user_id.clone(),
        ])
    }
}

fn call(getter: Option<&ValueGetter>) -> Option<String> {
    getter.and_then(ValueGetter::get)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn builder() -> crate::config::ShoplyConfigBuilder {
        ShoplyConfig::builder().base_url(BaseUrl::new("https://api.shop.shoply.io").unwrap())
    }

    fn context_with_tokens() -> SessionContext {
        SessionContext {
            user_id: Some("context-user".to_string()),
            access_token: Some("context-access".to_string()),
            refresh_token: Some("context-refresh".to_string()),
            ..SessionContext::default()
        }
    }

    #[test]
    fn test_resolve_first_skips_empty_and_missing() {
        assert_eq!(resolve_first(&[]), None);
        assert_eq!(resolve_first(&[&|| None, &|| Some(String::new())]), None);
        assert_eq!(
            resolve_first(&[&|| Some("a".to_string()), &|| Some("b".to_string())]).as_deref(),
            Some("a")
        );
    }

    #[test]
    fn test_resolve_first_stops_at_first_value() {
        let calls = AtomicUsize::new(0);
        let counted = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Some("late".to_string())
        };

        let value = resolve_first(&[&|| Some("early".to_string()), &counted]);

        assert_eq!(value.as_deref(), Some("early"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_access_token_falls_back_to_context() {
        let config = builder().build().unwrap();
        let context = context_with_tokens();

        let source = CredentialSource::new(&config, None, &context);
        assert_eq!(source.access_token().as_deref(), Some("context-access"));
    }

    #[test]
    fn test_access_token_getter_beats_context() {
        let config = builder()
            .access_token_getter(ValueGetter::new(|| Some("getter-access".to_string())))
            .build()
            .unwrap();
        let context = context_with_tokens();

        let source = CredentialSource::new(&config, None, &context);
        assert_eq!(source.access_token().as_deref(), Some("getter-access"));
    }

    #[test]
    fn test_access_token_global_beats_getter() {
        let config = builder()
            .access_token("global-access")
            .access_token_getter(ValueGetter::new(|| Some("getter-access".to_string())))
            .build()
            .unwrap();
        let context = context_with_tokens();

        let source = CredentialSource::new(&config, None, &context);
        assert_eq!(source.access_token().as_deref(), Some("global-access"));
    }

    #[test]
    fn test_access_token_per_call_beats_global() {
        let config = builder()
            .access_token("global-access")
            .access_token_getter(ValueGetter::new(|| Some("getter-access".to_string())))
            .build()
            .unwrap();
        let context = context_with_tokens();
        let overrides = RequestConfig::new().access_token("call-access");

        let source = CredentialSource::new(&config, Some(&overrides), &context);
        assert_eq!(source.access_token().as_deref(), Some("call-access"));
    }

    #[test]
    fn test_empty_per_call_token_falls_through() {
        let config = builder().access_token("global-access").build().unwrap();
        let context = SessionContext::default();
        let overrides = RequestConfig::new().access_token("");

        let source = CredentialSource::new(&config, Some(&overrides), &context);
        assert_eq!(source.access_token().as_deref(), Some("global-access"));
    }

    #[test]
    fn test_no_token_anywhere_resolves_to_none() {
        let config = builder()
            .refresh_token_getter(ValueGetter::new(|| None))
            .build()
            .unwrap();
        let context = SessionContext::default();

        let source = CredentialSource::new(&config, None, &context);
        assert_eq!(source.access_token(), None);
        assert_eq!(source.refresh_token(), None);
        assert_eq!(source.user_id(), None);
    }

    #[test]
    fn test_refresh_token_priority_is_independent_of_access_token() {
        let config = builder()
            .access_token("global-access")
            .refresh_token_getter(ValueGetter::new(|| Some("getter-refresh".to_string())))
            .build()
            .unwrap();
        let context = context_with_tokens();

        let source = CredentialSource::new(&config, None, &context);
        assert_eq!(source.access_token().as_deref(), Some("global-access"));
        assert_eq!(source.refresh_token().as_deref(), Some("getter-refresh"));

        let overrides = RequestConfig::new().refresh_token("call-refresh");
        let source = CredentialSource::new(&config, Some(&overrides), &context);
        assert_eq!(source.refresh_token().as_deref(), Some("call-refresh"));
    }

    #[test]
    fn test_user_id_priority() {
        let context = context_with_tokens();

        let config = builder().build().unwrap();
        let source = CredentialSource::new(&config, None, &context);
        assert_eq!(source.user_id().as_deref(), Some("context-user"));

        let config = builder()
            .user_id_getter(ValueGetter::new(|| Some("getter-user".to_string())))
            .build()
            .unwrap();
        let source = CredentialSource::new(&config, None, &context);
        assert_eq!(source.user_id().as_deref(), Some("getter-user"));

        let config = builder()
            .user_id("global-user")
            .user_id_getter(ValueGetter::new(|| Some("getter-user".to_string())))
            .build()
            .unwrap();
        let source = CredentialSource::new(&config, None, &context);
        assert_eq!(source.user_id().as_deref(), Some("global-user"));
    }

    #[test]
    fn test_getter_not_invoked_when_explicit_value_present() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config = builder()
            .access_token("global-access")
            .access_token_getter(ValueGetter::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Some("getter-access".to_string())
            }))
            .build()
            .unwrap();
        let context = SessionContext::default();

        let source = CredentialSource::new(&config, None, &context);
        let _ = source.access_token();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
