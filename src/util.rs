// Helpers for turning command-line input into a connect target.

/// Splits `host:port` or `[v6]:port`. A bare IPv6 address or a host without
/// a parseable port comes back unchanged with `None`.
pub fn parse_host_port(s: &str) -> (String, Option<u16>) {
    if let Some(rest) = s.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            let port = tail.strip_prefix(':').and_then(|p| p.parse::<u16>().ok());
            return (host.to_string(), port);
        }
    }
    if let Some(idx) = s.rfind(':') {
        // more than one colon and no brackets: an IPv6 literal
        if s[..idx].contains(':') {
            return (s.to_string(), None);
        }
        if let Ok(port) = s[idx+1..].parse::<u16>() {
            return (s[..idx].to_string(), Some(port));
        }
    }
    (s.to_string(), None)
}
