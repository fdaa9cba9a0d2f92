//! Transparent refresh-and-replay for expired access tokens.
//!
//! [`AuthRefresh`] wraps a single call in a small state machine:
//!
//! ```text
//! Send ──▶ success / other error ─────────────────────────────▶ Finished
//!   │
//!   └─▶ expired status on the initial attempt ─▶ Refreshing
//!            │  no refresh token / refresh failed ─▶ Finished(original error)
//!            └─ new tokens committed ─▶ Replay ─▶ Finished(replay outcome)
//! ```
//!
//! The retry marker is the [`Attempt`] carried by the
//! [`PreparedRequest`] itself, so each in-flight request gets at most one
//! refresh independently of any other request.

use crate::auth::{refresh_tokens, ContextUpdate, FieldUpdate, SessionCallbacks, SessionStore};
use crate::clients::errors::TransportError;
use crate::clients::http_client::{Attempt, HttpClient, PreparedRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ShoplyConfig;

type Outcome = Result<HttpResponse, TransportError>;

enum State {
    Send(PreparedRequest),
    Refreshing {
        request: PreparedRequest,
        refresh_token: String,
        original: TransportError,
    },
    Finished(Outcome),
}

/// Refresh-and-replay interceptor bound to one transport client.
///
/// Built per call by [`ShoplyClient`](crate::ShoplyClient) from its current
/// transport, session store and callbacks, so replacing the transport through
/// `set_config` rewires the interceptor as well.
#[derive(Debug, Clone, Copy)]
pub struct AuthRefresh<'a> {
    transport: &'a HttpClient,
    session: &'a SessionStore,
    callbacks: &'a SessionCallbacks,
    expired_status: u16,
}

impl<'a> AuthRefresh<'a> {
    /// Creates an interceptor over `transport`.
    ///
    /// `expired_status` is the status code that signals an expired access token.
    #[must_use]
    pub const fn new(
        transport: &'a HttpClient,
        session: &'a SessionStore,
        callbacks: &'a SessionCallbacks,
        expired_status: u16,
    ) -> Self {
        Self {
            transport,
            session,
            callbacks,
            expired_status,
        }
    }

    /// Sends `request`, refreshing the access token and replaying once if the
    /// server reports it expired.
    ///
    /// `effective` is the merged configuration of the call, used to address
    /// the refresh endpoint. `refresh_token` is resolved lazily, only when a
    /// refresh is actually needed.
    ///
    /// # Errors
    ///
    /// Returns the original [`TransportError`] when no refresh is possible or
    /// the refresh fails, and the replay's error when the replay fails.
    pub async fn send<F>(
        &self,
        effective: &ShoplyConfig,
        request: PreparedRequest,
        refresh_token: F,
    ) -> Outcome
    where
        F: FnOnce() -> Option<String>,
    {
        let mut refresh_token = Some(refresh_token);
        let mut state = State::Send(request);

        loop {
            state = match state {
                State::Send(request) => {
                    let outcome = self.transport.send(&request).await;
                    match outcome {
                        Err(error) if self.should_refresh(&request, &error) => {
                            match refresh_token.take().and_then(|resolve| resolve()) {
                                Some(token) => State::Refreshing {
                                    request,
                                    refresh_token: token,
                                    original: error,
                                },
                                None => {
                                    tracing::warn!(
                                        path = %request.path(),
                                        "Access token expired but no refresh token is available"
                                    );
                                    State::Finished(Err(error))
                                }
                            }
                        }
                        other => State::Finished(other),
                    }
                }
                State::Refreshing {
                    request,
                    refresh_token,
                    original,
                } => {
                    tracing::debug!(path = %request.path(), "Refreshing expired access token");
                    match refresh_tokens(effective, &refresh_token).await {
                        Ok(tokens) => {
                            self.session.commit(
                                ContextUpdate {
                                    access_token: FieldUpdate::Set(tokens.access_token.clone()),
                                    refresh_token: FieldUpdate::set_if_some(tokens.refresh_token),
                                    ..ContextUpdate::default()
                                },
                                self.callbacks,
                            );
                            tracing::debug!(path = %request.path(), "Replaying request with refreshed token");
                            State::Send(request.into_replay(&tokens.access_token))
                        }
                        Err(error) => {
                            tracing::warn!(
                                path = %request.path(),
                                error = %error,
                                "Token refresh failed, returning original error"
                            );
                            State::Finished(Err(original))
                        }
                    }
                }
                State::Finished(outcome) => return outcome,
            };
        }
    }

    fn should_refresh(&self, request: &PreparedRequest, error: &TransportError) -> bool {
        request.attempt() == Attempt::Initial
            && error.response_status() == Some(self.expired_status)
    }
}
