/// Canonicalize a host token from a server block header.
///
/// A `http://` or `https://` prefix is removed. Without an explicit
/// port the scheme is folded into the port position (`host:http`,
/// `host:https`); with one, the scheme is dropped and the port kept.
/// Hosts without a scheme pass through unchanged.
///
/// ```
/// use caddyfile_engine::normalize_host;
///
/// assert_eq!(normalize_host("http://host"), "host:http");
/// assert_eq!(normalize_host("https://host:8443"), "host:8443");
/// assert_eq!(normalize_host("host1:1234"), "host1:1234");
/// ```
#[must_use]
pub fn normalize_host(raw: &str) -> String {
    let (scheme, rest) = if let Some(rest) = raw.strip_prefix("https://") {
        ("https", rest)
    } else if let Some(rest) = raw.strip_prefix("http://") {
        ("http", rest)
    } else {
        return raw.to_string();
    };

    let rest = rest.strip_suffix('/').unwrap_or(rest);
    let (authority, path) = rest.find('/').map_or((rest, ""), |i| rest.split_at(i));

    if has_port(authority) {
        format!("{authority}{path}")
    } else {
        format!("{authority}:{scheme}{path}")
    }
}

fn has_port(authority: &str) -> bool {
    // Colons inside an IPv6 literal are not a port separator.
    let tail = authority
        .rfind(']')
        .map_or(authority, |i| &authority[i + 1..]);
    tail.contains(':')
}
