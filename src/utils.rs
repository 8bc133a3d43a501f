use soup::prelude::*;
use url::Url;

/// Last non-empty path segment of a (possibly relative) link
pub fn slug_from_href(base_url: &Url, href: &str) -> Option<String> {
    let url = base_url.join(href).ok()?;
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Resolves HTML character references in a text fragment
pub fn decode_entities(fragment: &str) -> String {
    if !fragment.contains('&') {
        return fragment.to_string();
    }
    let soup = Soup::new(fragment);
    match soup.tag("body").find() {
        Some(body) => body.text(),
        None => fragment.to_string(),
    }
}
