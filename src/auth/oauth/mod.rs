//! OAuth 2.0 authorization code flow.
//!
//! 1. Send the user to [`construct_connect_url`].
//! 2. The user authorizes the application and is redirected back with a
//!    `code` query parameter.
//! 3. Exchange the code with [`fetch_access_token`]; the resulting token is
//!    stored on the [`Credential`](crate::Credential) and used for every
//!    subsequent request.
//!
//! # Example
//!
//! ```rust,ignore
//! use soundcloud_api::auth::oauth::{construct_connect_url, fetch_access_token};
//! use soundcloud_api::{DEFAULT_CONNECT_URL, DEFAULT_TOKEN_URL};
//!
//! let url = construct_connect_url(&credential, DEFAULT_CONNECT_URL)?;
//! // ... redirect the user to `url`, receive `code` on the callback ...
//! let token = fetch_access_token(&credential, &code, DEFAULT_TOKEN_URL).await?;
//! ```

mod begin_auth;
mod error;
mod token_exchange;

pub use begin_auth::{construct_connect_url, NON_EXPIRING_SCOPE};
pub use error::OAuthError;
pub use token_exchange::{fetch_access_token, AccessToken};
