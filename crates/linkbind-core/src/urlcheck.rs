//! URL validation and file-name derivation.

use reqwest::Url;

use crate::defaults;

/// Whether the string parses as an absolute `http` or `https` URL.
///
/// Relative paths, other schemes, and malformed strings are all invalid.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Derive an attachment file name from a URL: the last path segment,
/// percent-decoded and sanitized, or `"file"` when nothing usable exists.
pub fn file_name_from_url(url: &str) -> String {
    let segment = Url::parse(url).ok().and_then(|parsed| {
        parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map(str::to_owned)
    });

    let Some(segment) = segment else {
        return defaults::DEFAULT_FILE_NAME.to_string();
    };

    let decoded = urlencoding::decode(&segment)
        .map(|cow| cow.into_owned())
        .unwrap_or(segment);

    let sanitized = sanitize_file_name(&decoded);
    if sanitized.is_empty() {
        defaults::DEFAULT_FILE_NAME.to_string()
    } else {
        sanitized
    }
}

/// Strip path components and replace characters hosts commonly reject.
fn sanitize_file_name(name: &str) -> String {
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    sanitized.trim().to_string()
}
