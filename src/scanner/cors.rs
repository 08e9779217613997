//! Reflected-origin CORS detection predicate

use crate::models::EVIL_ORIGIN_DOMAIN;
use reqwest::header::{
    HeaderMap, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN,
};

/// Returns true when a response both reflects the forged origin and
/// allows credentials for it.
///
/// Header name lookups are case-insensitive and only the first value for
/// a name is considered. Values are matched by lowercased substring: an
/// `Access-Control-Allow-Origin` containing the marker domain counts,
/// and an `Access-Control-Allow-Credentials` containing `true` counts.
pub fn is_vulnerable(headers: &HeaderMap) -> bool {
    let allows_origin = headers
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_lowercase().contains(EVIL_ORIGIN_DOMAIN))
        .unwrap_or(false);

    let allows_credentials = headers
        .get(ACCESS_CONTROL_ALLOW_CREDENTIALS)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_lowercase().contains("true"))
        .unwrap_or(false);

    allows_origin && allows_credentials
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                HeaderName::from_bytes(name.as_bytes()).expect("header name"),
                HeaderValue::from_str(value).expect("header value"),
            );
        }
        map
    }

    #[test]
    fn test_reflected_origin_with_credentials() {
        let h = headers(&[
            ("Access-Control-Allow-Origin", "https://x.myevilsite.com"),
            ("Access-Control-Allow-Credentials", "true"),
        ]);
        assert!(is_vulnerable(&h));
    }

    #[test]
    fn test_trusted_origin_not_flagged() {
        let h = headers(&[
            ("Access-Control-Allow-Origin", "https://trusted.com"),
            ("Access-Control-Allow-Credentials", "true"),
        ]);
        assert!(!is_vulnerable(&h));
    }

    #[test]
    fn test_reflection_without_credentials_not_flagged() {
        let h = headers(&[("Access-Control-Allow-Origin", "https://x.myevilsite.com")]);
        assert!(!is_vulnerable(&h));
    }

    #[test]
    fn test_credentials_without_reflection_not_flagged() {
        let h = headers(&[("Access-Control-Allow-Credentials", "true")]);
        assert!(!is_vulnerable(&h));
    }

    #[test]
    fn test_no_cors_headers_not_flagged() {
        let h = headers(&[("Content-Type", "text/html")]);
        assert!(!is_vulnerable(&h));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let h = headers(&[
            ("access-control-allow-origin", "https://x.MyEvilSite.COM"),
            ("Access-Control-Allow-Credentials", "TRUE"),
        ]);
        assert!(is_vulnerable(&h));
    }

    #[test]
    fn test_credentials_value_matched_by_substring() {
        // Lenient on purpose: any value containing "true" counts.
        let h = headers(&[
            ("Access-Control-Allow-Origin", "http://a.myevilsite.com"),
            ("Access-Control-Allow-Credentials", "not-quite-true"),
        ]);
        assert!(is_vulnerable(&h));
    }

    #[test]
    fn test_only_first_value_considered() {
        let h = headers(&[
            ("Access-Control-Allow-Origin", "https://trusted.com"),
            ("Access-Control-Allow-Origin", "https://x.myevilsite.com"),
            ("Access-Control-Allow-Credentials", "true"),
        ]);
        assert!(!is_vulnerable(&h));
    }
}
