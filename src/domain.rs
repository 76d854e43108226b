/// Hostname extraction for whitelist matching
use url::Url;

/// Extract the hostname from a page URL
///
/// Only http(s) pages can be managed. Everything else yields `None`:
/// - strings the URL parser rejects ("not a url")
/// - internal pages (chrome://, about:, file://, extension pages)
/// - URLs with an empty host
///
/// The hostname is returned exactly as the parser serializes it, which is the
/// same form the browser reports as `location.hostname`. No `www.` stripping
/// or other normalization is applied.
///
/// Examples:
/// - https://example.com/path?q=1 → example.com
/// - http://localhost:3000 → localhost
/// - https://news.bbc.co.uk/article → news.bbc.co.uk
pub fn extract_hostname(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let parsed = Url::parse(url).ok()?;
    if !is_manageable_scheme(parsed.scheme()) {
        return None;
    }

    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

fn is_manageable_scheme(scheme: &str) -> bool {
    matches!(scheme, "http" | "https")
}
