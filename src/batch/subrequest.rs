//! Sub-request synthesis.
//!
//! # Responsibilities
//! - Build one virtual `Request` per spec entry
//! - Force the method to GET regardless of the outer call's method
//! - Inherit the outer request's identity headers (cookies, authorization)
//!   while dropping hop/transport headers that describe the outer envelope
//!
//! # Design Decisions
//! - The path is used exactly as extracted; a path the router cannot parse
//!   surfaces as a 404 result for that key, never a call-level failure
//! - Headers are appended, not inserted, so repeated cookie headers survive

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, Uri};
use thiserror::Error;

/// Headers describing the outer transport envelope, never the caller's
/// identity. Copying these would corrupt the synthesized GET.
const HOP_HEADERS: [&str; 7] = [
    "host",
    "content-length",
    "content-type",
    "transfer-encoding",
    "connection",
    "expect",
    "upgrade",
];

/// The extracted path could not form an origin-form request URI.
#[derive(Debug, Error)]
#[error("sub-path {path:?} is not a valid origin-form URI")]
pub struct SynthesisError {
    path: String,
}

/// Build the virtual GET request for one sub-path, inheriting the outer
/// call's headers minus [`HOP_HEADERS`].
pub fn synthesize(path: &str, outer_headers: &HeaderMap) -> Result<Request<Body>, SynthesisError> {
    let invalid = || SynthesisError {
        path: path.to_string(),
    };
    // Origin-form only: anything else would parse as an authority and
    // dispatch somewhere surprising.
    if !path.starts_with('/') {
        return Err(invalid());
    }
    let uri = Uri::try_from(path).map_err(|_| invalid())?;

    let mut request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .map_err(|_| invalid())?;

    let headers = request.headers_mut();
    for (name, value) in outer_headers {
        if HOP_HEADERS.contains(&name.as_str()) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, COOKIE, HOST};

    fn outer_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "session=abc123".parse().unwrap());
        headers.insert(AUTHORIZATION, "Bearer token".parse().unwrap());
        headers.insert(HOST, "example.com".parse().unwrap());
        headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
        headers.insert(CONTENT_LENGTH, "42".parse().unwrap());
        headers
    }

    #[test]
    fn method_is_always_get() {
        let request = synthesize("/resource1", &outer_headers()).unwrap();
        assert_eq!(request.method(), Method::GET);
    }

    #[test]
    fn path_and_query_are_preserved() {
        let request = synthesize("/resource2/5?verbose=true", &outer_headers()).unwrap();
        assert_eq!(request.uri().path(), "/resource2/5");
        assert_eq!(request.uri().query(), Some("verbose=true"));
    }

    #[test]
    fn identity_headers_are_inherited() {
        let request = synthesize("/resource1", &outer_headers()).unwrap();
        assert_eq!(request.headers()[COOKIE], "session=abc123");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer token");
    }

    #[test]
    fn hop_headers_are_dropped() {
        let request = synthesize("/resource1", &outer_headers()).unwrap();
        assert!(request.headers().get(HOST).is_none());
        assert!(request.headers().get(CONTENT_TYPE).is_none());
        assert!(request.headers().get(CONTENT_LENGTH).is_none());
    }

    #[test]
    fn repeated_cookies_survive() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, "a=1".parse().unwrap());
        headers.append(COOKIE, "b=2".parse().unwrap());
        let request = synthesize("/resource1", &headers).unwrap();
        assert_eq!(request.headers().get_all(COOKIE).iter().count(), 2);
    }

    #[test]
    fn relative_path_is_rejected() {
        assert!(synthesize("wrong", &HeaderMap::new()).is_err());
    }

    #[test]
    fn unparseable_path_is_rejected() {
        assert!(synthesize("/with space", &HeaderMap::new()).is_err());
    }
}
