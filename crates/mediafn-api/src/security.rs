//! Validation of caller-supplied URLs the server fetches itself.
//!
//! The service downloads whatever video URL it is handed, so internal
//! addresses and cloud metadata endpoints are refused (SSRF protection)
//! unless explicitly allowed for local development.

use mediafn_media::is_restricted_url;
use tracing::warn;
use url::Url;

/// Maximum URL length to prevent DoS attacks.
pub const MAX_URL_LENGTH: usize = 2048;

/// Result of URL validation.
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationResult {
    /// URL is valid and allowed (trimmed).
    Valid(String),
    /// URL is malformed or uses an unsupported protocol.
    Invalid(String),
    /// URL targets an internal or restricted endpoint.
    Blocked(String),
    /// URL exceeds maximum length.
    TooLong,
}

impl UrlValidationResult {
    /// Convert to Result for easy error handling.
    pub fn into_result(self) -> Result<String, String> {
        match self {
            Self::Valid(url) => Ok(url),
            Self::Invalid(msg) | Self::Blocked(msg) => Err(msg),
            Self::TooLong => Err(format!(
                "URL exceeds maximum length of {} characters",
                MAX_URL_LENGTH
            )),
        }
    }
}

/// Validate a URL the server is about to download.
///
/// Checks length, protocol (http/https only) and, unless `allow_private`,
/// rejects loopback, private-range and metadata hosts.
pub fn validate_media_url(url: &str, allow_private: bool) -> UrlValidationResult {
    let url = url.trim();
    if url.len() > MAX_URL_LENGTH {
        return UrlValidationResult::TooLong;
    }
    if url.is_empty() {
        return UrlValidationResult::Invalid("URL cannot be empty".to_string());
    }

    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(e) => return UrlValidationResult::Invalid(format!("Invalid URL format: {}", e)),
    };

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return UrlValidationResult::Invalid(format!(
                "Invalid protocol '{}'. Only HTTP and HTTPS are allowed.",
                scheme
            ))
        }
    }

    if parsed.host_str().is_none() {
        return UrlValidationResult::Invalid("URL must have a valid host".to_string());
    }

    if !allow_private && is_restricted_url(&parsed) {
        warn!(url = %url, host = ?parsed.host_str(), "Blocked restricted host");
        return UrlValidationResult::Blocked(
            "URL appears to target an internal or restricted endpoint".to_string(),
        );
    }

    UrlValidationResult::Valid(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_urls_pass() {
        assert_eq!(
            validate_media_url(" https://storage.example.com/v.mp4 ", false),
            UrlValidationResult::Valid("https://storage.example.com/v.mp4".to_string())
        );
        assert!(validate_media_url("http://cdn.example.org/a.mp4?x=1", false)
            .into_result()
            .is_ok());
    }

    #[test]
    fn test_bad_protocol_and_format() {
        assert!(matches!(
            validate_media_url("ftp://example.com/v.mp4", false),
            UrlValidationResult::Invalid(_)
        ));
        assert!(matches!(
            validate_media_url("file:///etc/passwd", false),
            UrlValidationResult::Invalid(_)
        ));
        assert!(matches!(
            validate_media_url("not a url", false),
            UrlValidationResult::Invalid(_)
        ));
        assert!(matches!(validate_media_url("  ", false), UrlValidationResult::Invalid(_)));
    }

    #[test]
    fn test_internal_hosts_blocked() {
        for url in [
            "http://127.0.0.1:8080/v.mp4",
            "http://localhost/v.mp4",
            "http://10.1.2.3/v.mp4",
            "http://172.20.0.5/v.mp4",
            "http://192.168.1.1/v.mp4",
            "http://169.254.169.254/latest/meta-data",
            "http://metadata.google.internal/computeMetadata/v1/",
            "http://[::1]/v.mp4",
        ] {
            assert!(
                matches!(validate_media_url(url, false), UrlValidationResult::Blocked(_)),
                "{} should be blocked",
                url
            );
        }
        // 172.32.x.x is outside the private range
        assert!(validate_media_url("http://172.32.0.1/v.mp4", false).into_result().is_ok());
    }

    #[test]
    fn test_obfuscated_internal_hosts_blocked() {
        for url in [
            "http://user@127.0.0.1/v.mp4",
            "http://x@169.254.169.254/latest/meta-data",
            "http://2130706433/v.mp4",
            "http://0x7f.0.0.1/v.mp4",
            "http://[::ffff:127.0.0.1]/v.mp4",
        ] {
            assert!(
                matches!(validate_media_url(url, false), UrlValidationResult::Blocked(_)),
                "{} should be blocked",
                url
            );
        }
    }

    #[test]
    fn test_allow_private_for_development() {
        assert!(validate_media_url("http://127.0.0.1:9000/v.mp4", true)
            .into_result()
            .is_ok());
    }

    #[test]
    fn test_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(validate_media_url(&url, false), UrlValidationResult::TooLong);
    }
}
