// Unit tests for session resolution

use crate::session::{BearerSessionResolver, SessionResolver};

use http::header::{AUTHORIZATION, COOKIE};
use http::{HeaderMap, HeaderValue};

fn headers(pairs: &[(http::header::HeaderName, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.append(name.clone(), HeaderValue::from_static(value));
    }
    map
}

/// **VALUE**: Verifies a bearer header authenticates the request.
///
/// **BUG THIS CATCHES**: Would catch a case-sensitive scheme check ("bearer" vs "Bearer").
#[test]
fn given_bearer_header_when_resolving_then_authenticated() {
    let resolver = BearerSessionResolver::default();

    for value in ["Bearer abc", "bearer abc", "BEARER   abc "] {
        let identity = resolver.resolve(&headers(&[(AUTHORIZATION, value)]));
        assert!(identity.is_authenticated(), "{value}");
        assert_eq!(identity.bearer_value(), "abc");
    }
}

#[test]
fn given_session_cookie_when_resolving_then_authenticated() {
    let resolver = BearerSessionResolver::default();

    let identity = resolver.resolve(&headers(&[(COOKIE, "theme=dark; session_token=xyz")]));

    assert!(identity.is_authenticated());
    assert_eq!(identity.bearer_value(), "xyz");
}

/// **VALUE**: Verifies non-bearer schemes and blank tokens stay anonymous.
///
/// **WHY THIS MATTERS**: Treating `Basic` credentials as a bearer token would forward
/// unrelated secrets upstream.
///
/// **BUG THIS CATCHES**: Would catch if the scheme check is dropped.
#[test]
fn given_no_usable_credentials_when_resolving_then_anonymous() {
    let resolver = BearerSessionResolver::default();

    for map in [
        HeaderMap::new(),
        headers(&[(AUTHORIZATION, "Basic dXNlcjpwYXNz")]),
        headers(&[(AUTHORIZATION, "Bearer ")]),
        headers(&[(COOKIE, "session_token=")]),
        headers(&[(COOKIE, "other_token=abc")]),
    ] {
        assert!(!resolver.resolve(&map).is_authenticated());
    }
}

#[test]
fn given_blank_bearer_and_cookie_when_resolving_then_uses_cookie() {
    let resolver = BearerSessionResolver::new("sid");

    let identity = resolver.resolve(&headers(&[(AUTHORIZATION, "Bearer  "), (COOKIE, "sid=from-cookie")]));

    assert_eq!(identity.bearer_value(), "from-cookie");
}
