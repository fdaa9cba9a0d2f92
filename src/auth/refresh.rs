//! Access token refresh.
//!
//! [`refresh_tokens`] exchanges a refresh token for a new token pair at
//! `POST {api_root}/users/refresh`. The call is made on a freshly built,
//! credential-free client: no `Authorization` header, no cookie store, and no
//! refresh interception, so a failing refresh can never trigger another one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ShoplyConfig;

/// Path of the token refresh endpoint, relative to the API root.
pub const REFRESH_PATH: &str = "/users/refresh";

/// Errors that can occur while refreshing tokens.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The refresh request could not be sent or its body could not be read.
    #[error("Token refresh request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Token refresh rejected with status {status}")]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
    },

    /// The response did not contain a new access token.
    #[error("Token refresh response did not contain an access token")]
    MissingAccessToken,
}

/// A token pair returned by the refresh endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshedTokens {
    /// The new access token.
    pub access_token: String,
    /// The new refresh token, when the server rotated it.
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for RefreshedTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshedTokens")
            .field("access_token", &"*****")
            .field(
                "refresh_token",
                &crate::config::redact(self.refresh_token.as_ref()),
            )
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct RefreshEnvelope {
    #[serde(default)]
    data: Option<RefreshData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshData {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Exchanges `refresh_token` for a new token pair.
///
/// `config` is the effective configuration of the request being recovered;
/// its API root and timeout are used for the refresh call.
///
/// # Errors
///
/// - [`RefreshError::Network`] if the request cannot be sent or read
/// - [`RefreshError::Rejected`] for a non-2xx response
/// - [`RefreshError::MissingAccessToken`] if the body has no `data.accessToken`
pub async fn refresh_tokens(
    config: &ShoplyConfig,
    refresh_token: &str,
) -> Result<RefreshedTokens, RefreshError> {
    let url = format!("{}{REFRESH_PATH}", config.api_root());

    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(config.timeout())
        .build()?;

    let response = client
        .post(&url)
        .header("Accept", "application/json")
        .json(&RefreshRequest { refresh_token })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RefreshError::Rejected {
            status: status.as_u16(),
        });
    }

    let text = response.text().await?;
    let envelope: RefreshEnvelope = serde_json::from_str(&text).unwrap_or_default();

    let data = envelope.data.unwrap_or_default();
    let access_token = data
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(RefreshError::MissingAccessToken)?;

    Ok(RefreshedTokens {
        access_token,
        refresh_token: data.refresh_token.filter(|token| !token.is_empty()),
    })
}
