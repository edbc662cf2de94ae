//! HTTP client types for SoundCloud API communication.
//!
//! This module provides the transport layer underneath scopes: request and
//! response types, ordered parameters, and the interpreter for the API's
//! redirect conventions.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A fully read response
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`Params`]: Ordered, repeatable request parameters, including uploads
//! - [`RedirectInterpreter`]: The `303`/`201` state machine
//!
//! # Redirects
//!
//! Automatic redirects are disabled. A `303 See Other`, or a `201 Created`
//! with a `Location`, is followed with a signed GET and the final location
//! is reported back so the response can be mapped to the right resource
//! kind. A `201` without `Location` yields [`Dispatch::NoResult`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod params;
mod redirect;

pub use errors::{HttpError, HttpResponseError};
pub use http_client::{Dispatch, HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use params::{ParamValue, Params, Upload};
pub use redirect::{
    resolve_location, RedirectInterpreter, RedirectOutcome, RedirectState, Transition,
    MAX_REDIRECTS,
};
