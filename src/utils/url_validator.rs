//! 原始 URL 校验
//!
//! 只接受带主机名的 http(s) 绝对地址

use url::Url;

#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "Original URL is required"),
            Self::InvalidProtocol(scheme) => write!(
                f,
                "Unsupported scheme '{}:', use http:// or https://",
                scheme
            ),
            Self::DangerousProtocol(scheme) => write!(f, "Scheme '{}:' is not allowed", scheme),
            Self::InvalidFormat(reason) => write!(f, "Please enter a valid URL ({})", reason),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// Schemes that can run code or read local data when opened
const BLOCKED_SCHEMES: [&str; 6] = ["javascript", "data", "file", "vbscript", "about", "blob"];

pub fn validate_url(raw: &str) -> Result<(), UrlValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    // Url 会把 scheme 统一成小写
    let parsed = Url::parse(raw).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        s if BLOCKED_SCHEMES.contains(&s) => {
            return Err(UrlValidationError::DangerousProtocol(s.to_string()));
        }
        s => return Err(UrlValidationError::InvalidProtocol(s.to_string())),
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::InvalidFormat("missing host".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        for url in [
            "http://example.com",
            "https://example.com/path?query=1#frag",
            "HTTPS://Example.com",
            "http://localhost:8080",
            "  https://example.com  ",
        ] {
            assert_eq!(validate_url(url), Ok(()), "{}", url);
        }
    }

    #[test]
    fn test_rejects_relative_and_hostless() {
        for url in ["not-a-url", "/just/a/path", "https://"] {
            assert!(
                matches!(validate_url(url), Err(UrlValidationError::InvalidFormat(_))),
                "{}",
                url
            );
        }
    }

    #[test]
    fn test_blocked_schemes() {
        assert_eq!(
            validate_url("JavaScript:alert(1)"),
            Err(UrlValidationError::DangerousProtocol("javascript".to_string()))
        );
        assert!(matches!(
            validate_url("data:text/html,<b>hi</b>"),
            Err(UrlValidationError::DangerousProtocol(_))
        ));
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(UrlValidationError::DangerousProtocol(_))
        ));
    }

    #[test]
    fn test_other_schemes() {
        assert_eq!(
            validate_url("ftp://example.com"),
            Err(UrlValidationError::InvalidProtocol("ftp".to_string()))
        );
        assert!(matches!(
            validate_url("mailto:someone@example.com"),
            Err(UrlValidationError::InvalidProtocol(_))
        ));
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(validate_url(""), Err(UrlValidationError::EmptyUrl));
        assert_eq!(validate_url(" \t"), Err(UrlValidationError::EmptyUrl));
    }
}
