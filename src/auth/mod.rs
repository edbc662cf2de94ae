//! Authentication types for the SoundCloud API SDK.
//!
//! - [`Credential`]: application credentials plus the current access token
//! - [`oauth`]: the OAuth 2.0 authorization code flow
//!
//! Requests are signed by adding the access token as `oauth_token` query
//! parameter; requests made without a token are sent unsigned.

mod credential;
pub mod oauth;

pub use credential::Credential;
