//! Image URL validation before download.

/// Error type for image URL validation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse an image URL taken from a descriptor.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Resolve scheme-relative `//host/...` URLs to https
/// 3. Require an absolute http(s) URL
/// 4. Remove fragment (#...)
pub fn parse_image_url(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.starts_with("//") { format!("https:{trimmed}") } else { trimmed.to_string() };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::InvalidUrl(format!("{url_str} has no host")));
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let url = parse_image_url("https://apod.nasa.gov/apod/image/2205/a.jpg").unwrap();
        assert_eq!(url.host_str(), Some("apod.nasa.gov"));
        assert_eq!(url.path(), "/apod/image/2205/a.jpg");
    }

    #[test]
    fn test_parse_scheme_relative() {
        let url = parse_image_url("//img.youtube.com/vi/x/0.jpg").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("img.youtube.com"));
    }

    #[test]
    fn test_parse_requires_scheme() {
        let result = parse_image_url("apod.nasa.gov/a.jpg");
        assert!(matches!(result, Err(UrlError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_removes_fragment_keeps_query() {
        let url = parse_image_url("https://example.com/a.jpg?v=2#top").unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), Some("v=2"));
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        let result = parse_image_url("file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parse_image_url("   "), Err(UrlError::Empty)));
    }
}
