//! Filename hint from a URL path.

use percent_encoding::percent_decode_str;
use url::Url;

/// Last non-empty path segment of `url`, percent-decoded.
///
/// Returns `None` for root paths and `.`/`..` segments.
pub fn filename_from_url_path(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = percent_decode_str(segment).decode_utf8_lossy().into_owned();
    if decoded.is_empty() || decoded == "." || decoded == ".." {
        return None;
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(s: &str) -> Option<String> {
        filename_from_url_path(&Url::parse(s).unwrap())
    }

    #[test]
    fn normal() {
        assert_eq!(
            hint("https://ar5iv.labs.arxiv.org/html/2010.11929/assets/x1.png").as_deref(),
            Some("x1.png")
        );
        assert_eq!(hint("https://example.com/single").as_deref(), Some("single"));
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(hint("https://example.com/"), None);
        assert_eq!(hint("https://example.com"), None);
    }

    #[test]
    fn query_and_trailing_slash() {
        assert_eq!(hint("https://example.com/fig.svg?v=2").as_deref(), Some("fig.svg"));
        assert_eq!(hint("https://example.com/img/fig.svg/").as_deref(), Some("fig.svg"));
    }

    #[test]
    fn percent_escapes_decoded() {
        assert_eq!(hint("https://example.com/my%20fig.png").as_deref(), Some("my fig.png"));
    }
}
