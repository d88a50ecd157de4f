use crate::HttpStatusCode;

/// **VALUE**: Verifies 2xx classification used to decide between pass-through and fallback.
///
/// **WHY THIS MATTERS**: The gateway treats every non-2xx upstream status exactly like a
/// network failure. A wrong boundary would either hide upstream errors or drop good data.
///
/// **BUG THIS CATCHES**: Would catch off-by-one range errors (e.g. 300 treated as success).
#[test]
fn given_status_codes_when_classified_then_only_2xx_is_success() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(199).is_success());
    assert!(!HttpStatusCode(300).is_success());
    assert!(!HttpStatusCode(503).is_success());
}

#[test]
fn given_raw_code_when_converted_then_matches_named_constant_and_displays_number() {
    assert_eq!(HttpStatusCode::from(400), HttpStatusCode::BAD_REQUEST);
    assert_eq!(HttpStatusCode::from(500).as_u16(), 500);
    assert_eq!(HttpStatusCode(502).to_string(), "502");
}
