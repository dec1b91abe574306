//! Problem-details assertions for backend tests.
//!
//! Validates error responses against the stable wire contract without
//! depending on backend types.

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Mirrors the backend's ProblemDetails wire shape.
#[derive(Debug, Deserialize, Serialize)]
struct ProblemDetailsLike {
    #[serde(rename = "type")]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
}

/// Assert that raw response parts conform to the error contract:
/// the HTTP status matches, the body parses as problem details, and
/// its `code`/`status`/`detail` fields line up.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    body_bytes: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) {
    assert_eq!(status, expected_status);

    let body_str = String::from_utf8(body_bytes.to_vec())
        .expect("response body should be valid UTF-8");
    let problem: ProblemDetailsLike = serde_json::from_str(&body_str)
        .expect("response body should be valid ProblemDetails JSON");

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(!problem.title.is_empty());
    assert!(problem.type_.ends_with(&problem.code));

    if let Some(fragment) = expected_detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "detail {:?} does not contain {:?}",
            problem.detail,
            fragment
        );
    }
}
