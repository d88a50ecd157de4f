//! Identity resolution at the request boundary.
//!
//! The gateway only needs to know whether a caller is logged in and which
//! opaque bearer token to forward. Resolvers produce an [`IdentityState`];
//! nothing past this point looks inside a token.

use models::IdentityState;

use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE};
use log::debug;

pub const DEFAULT_SESSION_COOKIE: &str = "session_token";
const BEARER_SCHEME: &str = "bearer";

/// Produces the identity for an incoming request.
pub trait SessionResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> IdentityState;
}

/// Reads `Authorization: Bearer <token>`, then a session cookie.
#[derive(Debug, Clone)]
pub struct BearerSessionResolver {
    cookie_name: String,
}

impl Default for BearerSessionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

impl BearerSessionResolver {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    fn bearer_from_authorization<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
        let (scheme, token) = value.split_once(' ')?;
        scheme
            .eq_ignore_ascii_case(BEARER_SCHEME)
            .then(|| token.trim())
    }

    fn token_from_cookie<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, token)| token.trim())
    }
}

impl SessionResolver for BearerSessionResolver {
    fn resolve(&self, headers: &HeaderMap) -> IdentityState {
        let token = self
            .bearer_from_authorization(headers)
            .filter(|t| !t.is_empty())
            .or_else(|| self.token_from_cookie(headers));

        let identity = IdentityState::from_token(token);
        debug!("Resolved identity: authenticated={}", identity.is_authenticated());
        identity
    }
}
