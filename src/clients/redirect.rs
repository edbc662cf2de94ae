//! Interpretation of the API's redirect conventions.
//!
//! The API answers some requests with `303 See Other` to tell the client
//! where the result really lives, and answers creations with `201 Created`
//! plus a `Location`. Both are addressing corrections: the final location
//! determines which resource kind the payload is mapped to. A `201` without
//! a `Location` means the action succeeded without naming a resource.
//!
//! [`RedirectInterpreter`] is a small state machine driven by the HTTP
//! client: it is told about each response and answers whether to follow.

use url::Url;

use crate::clients::errors::HttpError;

/// Maximum number of redirect hops followed for a single call.
pub const MAX_REDIRECTS: usize = 10;

/// The state of a single logical call as seen by the interpreter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectState {
    /// Nothing has been sent yet.
    Idle,
    /// A request is in flight.
    Dispatched,
    /// The last response named another location which must be fetched.
    Followed {
        /// The absolute URL to fetch next.
        location: String,
    },
    /// A `201` without `Location`: success, but nothing to map.
    Suppressed,
    /// The last response is the final one.
    Direct,
}

/// What the caller should do after a response was observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Issue a GET against this absolute URL.
    Follow(String),
    /// Stop; the call produced no addressable result.
    Suppress,
    /// Stop; use the current response.
    Finish,
}

/// The observable result of a finished call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedirectOutcome {
    /// The last location the API redirected to, if any.
    pub final_path: Option<String>,
    /// `true` when the call ended in a `201` without `Location`.
    pub suppressed: bool,
}

/// Drives the `Idle → Dispatched → {Followed, Suppressed, Direct}` machine.
///
/// Relative locations are resolved against the URL that produced them.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::clients::{RedirectInterpreter, Transition};
/// use url::Url;
///
/// let requested = Url::parse("https://api.soundcloud.com/tracks/").unwrap();
/// let mut interpreter = RedirectInterpreter::new(requested);
/// interpreter.dispatch();
/// let next = interpreter.observe(201, Some("42")).unwrap();
/// assert_eq!(next, Transition::Follow("https://api.soundcloud.com/tracks/42".to_string()));
///
/// interpreter.dispatch();
/// assert_eq!(interpreter.observe(200, None).unwrap(), Transition::Finish);
/// assert_eq!(
///     interpreter.outcome().final_path.as_deref(),
///     Some("https://api.soundcloud.com/tracks/42")
/// );
/// ```
#[derive(Clone, Debug)]
pub struct RedirectInterpreter {
    current: Url,
    state: RedirectState,
    hops: usize,
    alternate_location: Option<String>,
}

impl RedirectInterpreter {
    /// Creates an interpreter for a call first sent to `requested`.
    #[must_use]
    pub fn new(requested: Url) -> Self {
        Self {
            current: requested,
            state: RedirectState::Idle,
            hops: 0,
            alternate_location: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &RedirectState {
        &self.state
    }

    /// Marks a request as sent.
    pub fn dispatch(&mut self) {
        self.state = RedirectState::Dispatched;
    }

    /// Feeds a response status and `Location` header into the machine.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::TooManyRedirects`] once more than
    /// [`MAX_REDIRECTS`] hops would be followed, and
    /// [`HttpError::InvalidUrl`] if the location cannot be resolved.
    pub fn observe(&mut self, code: u16, location: Option<&str>) -> Result<Transition, HttpError> {
        let location = location.filter(|l| !l.trim().is_empty());
        match (code, location) {
            (303 | 201, Some(location)) => {
                self.hops += 1;
                if self.hops > MAX_REDIRECTS {
                    return Err(HttpError::TooManyRedirects {
                        limit: MAX_REDIRECTS,
                    });
                }
                self.current = resolve_location(&self.current, location)?;
                let absolute = self.current.to_string();
                self.alternate_location = Some(absolute.clone());
                self.state = RedirectState::Followed {
                    location: absolute.clone(),
                };
                Ok(Transition::Follow(absolute))
            }
            (201, None) => {
                self.state = RedirectState::Suppressed;
                Ok(Transition::Suppress)
            }
            _ => {
                self.state = RedirectState::Direct;
                Ok(Transition::Finish)
            }
        }
    }

    /// Returns the outcome accumulated so far.
    #[must_use]
    pub fn outcome(&self) -> RedirectOutcome {
        RedirectOutcome {
            final_path: self.alternate_location.clone(),
            suppressed: self.state == RedirectState::Suppressed,
        }
    }
}

/// Resolves a `Location` header value against the URL it was received for.
///
/// ```rust
/// use soundcloud_api::clients::resolve_location;
/// use url::Url;
///
/// let base = Url::parse("http://localhost:8080/v1/tracks/?oauth_token=T").unwrap();
/// assert_eq!(
///     resolve_location(&base, "42").unwrap().as_str(),
///     "http://localhost:8080/v1/tracks/42"
/// );
/// assert_eq!(
///     resolve_location(&base, "/users/1").unwrap().as_str(),
///     "http://localhost:8080/users/1"
/// );
/// assert_eq!(
///     resolve_location(&base, "https://cdn.example.com/a.mp3").unwrap().as_str(),
///     "https://cdn.example.com/a.mp3"
/// );
/// ```
///
/// # Errors
///
/// Returns [`HttpError::InvalidUrl`] if the location is not a valid URL
/// reference.
pub fn resolve_location(base: &Url, location: &str) -> Result<Url, HttpError> {
    let location = location.trim();
    base.join(location).map_err(|source| HttpError::InvalidUrl {
        url: location.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUESTED: &str = "https://api.example.com/v1/tracks/?oauth_token=T";

    fn interpreter() -> RedirectInterpreter {
        RedirectInterpreter::new(Url::parse(REQUESTED).unwrap())
    }

    #[test]
    fn test_starts_idle() {
        let interpreter = interpreter();
        assert_eq!(interpreter.state(), &RedirectState::Idle);
        assert_eq!(interpreter.outcome(), RedirectOutcome::default());
    }

    #[test]
    fn test_303_is_followed_and_recorded() {
        let mut interpreter = interpreter();
        interpreter.dispatch();
        assert_eq!(interpreter.state(), &RedirectState::Dispatched);

        let transition = interpreter
            .observe(303, Some("https://api.example.com/users/7"))
            .unwrap();
        assert_eq!(
            transition,
            Transition::Follow("https://api.example.com/users/7".to_string())
        );
        assert!(matches!(interpreter.state(), RedirectState::Followed { .. }));
    }

    #[test]
    fn test_201_with_location_behaves_like_303() {
        let mut interpreter = interpreter();
        interpreter.dispatch();
        let transition = interpreter.observe(201, Some("/tracks/9")).unwrap();

        assert_eq!(
            transition,
            Transition::Follow("https://api.example.com/tracks/9".to_string())
        );
    }

    #[test]
    fn test_201_without_location_is_suppressed() {
        let mut interpreter = interpreter();
        interpreter.dispatch();
        assert_eq!(interpreter.observe(201, None).unwrap(), Transition::Suppress);

        let outcome = interpreter.outcome();
        assert!(outcome.suppressed);
        assert!(outcome.final_path.is_none());
    }

    #[test]
    fn test_other_codes_are_direct() {
        for code in [200, 204, 302, 404, 500] {
            let mut interpreter = interpreter();
            interpreter.dispatch();
            assert_eq!(interpreter.observe(code, None).unwrap(), Transition::Finish);
            assert_eq!(interpreter.state(), &RedirectState::Direct);
        }
    }

    #[test]
    fn test_last_location_wins() {
        let mut interpreter = interpreter();
        interpreter.dispatch();
        interpreter.observe(303, Some("/a")).unwrap();
        interpreter.dispatch();
        interpreter.observe(303, Some("/b")).unwrap();
        interpreter.dispatch();
        interpreter.observe(200, None).unwrap();

        assert_eq!(
            interpreter.outcome().final_path.as_deref(),
            Some("https://api.example.com/b")
        );
    }

    #[test]
    fn test_chain_longer_than_limit_fails() {
        let mut interpreter = interpreter();
        for _ in 0..MAX_REDIRECTS {
            interpreter.dispatch();
            assert!(interpreter.observe(303, Some("/loop")).is_ok());
        }
        interpreter.dispatch();
        let result = interpreter.observe(303, Some("/loop"));
        assert!(matches!(result, Err(HttpError::TooManyRedirects { limit }) if limit == MAX_REDIRECTS));
    }

    #[test]
    fn test_relative_location_resolves_against_requested_url() {
        let mut interpreter = interpreter();
        interpreter.dispatch();
        let transition = interpreter.observe(201, Some("42")).unwrap();

        assert_eq!(
            transition,
            Transition::Follow("https://api.example.com/v1/tracks/42".to_string())
        );
    }

    #[test]
    fn test_relative_location_resolves_against_previous_hop() {
        let mut interpreter = interpreter();
        interpreter.dispatch();
        interpreter.observe(303, Some("/v1/users/7/")).unwrap();
        interpreter.dispatch();
        interpreter.observe(303, Some("tracks")).unwrap();

        assert_eq!(
            interpreter.outcome().final_path.as_deref(),
            Some("https://api.example.com/v1/users/7/tracks")
        );
    }

    #[test]
    fn test_resolve_location_rejects_invalid_reference() {
        let base = Url::parse(REQUESTED).unwrap();
        let result = resolve_location(&base, "http://[::1");
        assert!(matches!(result, Err(HttpError::InvalidUrl { .. })));
    }
}
