//! User registration, authentication and profile calls.
//!
//! Successful calls that return identity data update the client's session
//! context:
//!
//! | call       | user | cart         | user id      | tokens |
//! |------------|------|--------------|--------------|--------|
//! | `login`    | set  | set if sent  | from cart    | set    |
//! | `verify`   | set  | set if sent  | from cart    | -      |
//! | `profile`  | set  | -            | -            | -      |
//! | `logout`   | clear| clear        | -            | clear  |
//! | `register` | -    | -            | -            | -      |

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::{ContextUpdate, FieldUpdate};
use crate::clients::{ApiRequest, HttpMethod, ShoplyResult};
use crate::config::RequestConfig;
use crate::resources::{to_body, Cart, User, UserAddress};
use crate::ShoplyClient;

/// Body of `POST /users/register`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    /// First and last name.
    pub name: String,
    /// Login email address.
    pub email: String,
    /// Plain-text password, sent over TLS.
    pub password: String,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// When sent, the server checks it matches `password`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_password: Option<String>,
    /// Must be one of the store's languages; defaults to the store default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Default address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<UserAddress>,
}

impl RegisterUserRequest {
    /// Creates a registration request with the required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }
}

/// Body of `POST /users/login`.
#[derive(Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserRequest {
    /// Login email address.
    pub email: String,
    /// Plain-text password, sent over TLS.
    pub password: String,
    /// Issue longer-lived tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<bool>,
}

impl LoginUserRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me: None,
        }
    }

    /// Sets the remember-me flag.
    #[must_use]
    pub const fn remember_me(mut self, remember: bool) -> Self {
        self.remember_me = Some(remember);
        self
    }
}

impl std::fmt::Debug for LoginUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginUserRequest")
            .field("email", &self.email)
            .field("password", &"*****")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Response data carrying a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    /// The user.
    pub user: User,
}

/// Response data of `POST /users/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The logged-in user.
    pub user: User,
    /// The user's cart, when the server returns one.
    #[serde(default)]
    pub cart: Option<Cart>,
    /// New access token.
    #[serde(default)]
    pub access_token: Option<String>,
    /// New refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Response data of `POST /users/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyResponse {
    /// The verified user.
    pub user: User,
    /// The user's cart.
    #[serde(default)]
    pub cart: Option<Cart>,
}

/// User calls, obtained from [`ShoplyClient::users`].
#[derive(Debug, Clone, Copy)]
pub struct UsersResource<'a> {
    client: &'a ShoplyClient,
}

impl<'a> UsersResource<'a> {
    pub(crate) const fn new(client: &'a ShoplyClient) -> Self {
        Self { client }
    }

    /// Registers a new user. Does not log the user in.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails, for example with status 400 for an unknown language.
    pub async fn register(
        &self,
        body: RegisterUserRequest,
        config: Option<RequestConfig>,
    ) -> ShoplyResult<UserResponse> {
        let request = ApiRequest::builder(HttpMethod::Post, "/users/register")
            .body(to_body(&body))
            .maybe_config(config)
            .build();

        self.client.request(request).await
    }

    /// Logs a user in and stores the user, cart and tokens in the session
    /// context.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails. The session context is left unchanged in that case.
    pub async fn login(
        &self,
        body: LoginUserRequest,
        config: Option<RequestConfig>,
    ) -> ShoplyResult<LoginResponse> {
        let request = ApiRequest::builder(HttpMethod::Post, "/users/login")
            .body(to_body(&body))
            .maybe_config(config)
            .build();

        let response: LoginResponse = self.client.request(request).await?;
        self.client.commit(ContextUpdate {
            user: FieldUpdate::Set(response.user.clone()),
            user_id: FieldUpdate::set_if_some(
                response.cart.as_ref().map(|cart| cart.user_id.clone()),
            ),
            cart: FieldUpdate::set_if_some(response.cart.clone()),
            access_token: FieldUpdate::from_option(response.access_token.clone()),
            refresh_token: FieldUpdate::from_option(response.refresh_token.clone()),
        });

        Ok(response)
    }

    /// Invalidates `refresh_token` on the server and clears the user, cart and
    /// tokens from the session context.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails. The session context is left unchanged in that case.
    pub async fn logout(
        &self,
        refresh_token: Option<&str>,
        config: Option<RequestConfig>,
    ) -> ShoplyResult<()> {
        let request = ApiRequest::builder(HttpMethod::Post, "/users/logout")
            .maybe_body(refresh_token.map(|token| json!({ "refreshToken": token })))
            .maybe_config(config)
            .build();

        let _: serde_json::Value = self.client.request(request).await?;
        self.client.commit(ContextUpdate {
            user: FieldUpdate::Clear,
            cart: FieldUpdate::Clear,
            access_token: FieldUpdate::Clear,
            refresh_token: FieldUpdate::Clear,
            ..ContextUpdate::default()
        });

        Ok(())
    }

    /// Verifies an access token and stores the returned user and cart in the
    /// session context.
    ///
    /// Without `access_token`, the token resolved for the call is verified.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails.
    pub async fn verify(
        &self,
        access_token: Option<&str>,
        config: Option<RequestConfig>,
    ) -> ShoplyResult<VerifyResponse> {
        let request = ApiRequest::builder(HttpMethod::Post, "/users/verify")
            .maybe_body(access_token.map(|token| json!({ "accessToken": token })))
            .maybe_config(config)
            .build();

        let response: VerifyResponse = self.client.request(request).await?;
        self.client.commit(ContextUpdate {
            user: FieldUpdate::Set(response.user.clone()),
            user_id: FieldUpdate::set_if_some(
                response.cart.as_ref().map(|cart| cart.user_id.clone()),
            ),
            cart: FieldUpdate::set_if_some(response.cart.clone()),
            ..ContextUpdate::default()
        });

        Ok(response)
    }

    /// Fetches the logged-in user's profile and stores it in the session
    /// context.
    ///
    /// # Errors
    ///
    /// Returns a [`ShoplyRequestError`](crate::ShoplyRequestError) if the call
    /// fails, typically with status 401 when no user is logged in.
    pub async fn profile(&self, config: Option<RequestConfig>) -> ShoplyResult<User> {
        let request = ApiRequest::builder(HttpMethod::Get, "/users/profile")
            .maybe_config(config)
            .build();

        let response: UserResponse = self.client.request(request).await?;
        self.client.commit(ContextUpdate {
            user: FieldUpdate::Set(response.user.clone()),
            ..ContextUpdate::default()
        });

        Ok(response.user)
    }
}
