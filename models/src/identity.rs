//! Per-request identity as produced by the session boundary.

use common::RedactedToken;

/// Who is asking, as far as the gateway needs to know.
///
/// Built once per request and read-only afterwards. The token is opaque: it is
/// forwarded upstream and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityState {
    authenticated: bool,
    token: Option<RedactedToken>,
}

impl IdentityState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Identity from an optional raw bearer token.
    ///
    /// Missing or blank tokens yield an anonymous identity, so an
    /// authenticated state always carries a usable token.
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some(t) if !t.is_empty() => Self {
                authenticated: true,
                token: Some(RedactedToken::new(t)),
            },
            _ => Self::anonymous(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn token(&self) -> Option<&RedactedToken> {
        self.token.as_ref()
    }

    /// Token to place after `Bearer `; empty for anonymous callers.
    pub fn bearer_value(&self) -> &str {
        self.token.as_ref().map(RedactedToken::expose).unwrap_or("")
    }
}
