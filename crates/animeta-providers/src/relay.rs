use std::sync::atomic::{AtomicUsize, Ordering};

/// Public CORS relays tried when a request fails with a cross-origin
/// signature. Third-party and best-effort: any of them may be down at any
/// time, which is fine because relay failures are swallowed.
pub const CORS_RELAYS: [&str; 3] = [
    "https://api.allorigins.win/raw?url=",
    "https://corsproxy.io/?",
    "https://cors.eu.org/",
];

/// Rotating cursor over the relay list. Each use starts one position
/// further along so a single dead relay does not eat the first attempt of
/// every request.
pub struct RelayRotation {
    cursor: AtomicUsize,
}

impl RelayRotation {
    pub fn new() -> Self {
        Self { cursor: AtomicUsize::new(0) }
    }

    /// All relay URLs for `target`, starting at the current cursor. The
    /// cursor advances on every call.
    pub fn relay_urls(&self, target: &str) -> Vec<String> {
        let start = self.cursor.fetch_add(1, Ordering::Relaxed);
        (0..CORS_RELAYS.len())
            .map(|offset| {
                let relay = CORS_RELAYS[(start + offset) % CORS_RELAYS.len()];
                // Relays that take the target in their query string need it
                // encoded or the target's own parameters become relay
                // parameters; path-style relays take it verbatim.
                if relay.contains('?') {
                    format!("{}{}", relay, urlencoding::encode(target))
                } else {
                    format!("{}{}", relay, target)
                }
            })
            .collect()
    }
}

impl Default for RelayRotation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_advances_between_uses() {
        let rotation = RelayRotation::new();
        let first = rotation.relay_urls("https://example.com/a");
        let second = rotation.relay_urls("https://example.com/a");
        assert_eq!(first.len(), CORS_RELAYS.len());
        assert_ne!(first[0], second[0]);
        assert_eq!(first[1], second[0]);
    }

    #[test]
    fn query_style_relays_encode_the_target() {
        let rotation = RelayRotation::new();
        let urls = rotation.relay_urls("https://api.myanimelist.net/v2/anime?q=naruto&limit=5");
        let allorigins = urls.iter().find(|u| u.starts_with("https://api.allorigins.win")).unwrap();
        assert!(allorigins.contains("%3A%2F%2F"));
        assert!(!allorigins.contains("?q="));

        // Bare-? relays must encode too or the target's parameters leak
        // into the relay's.
        let corsproxy = urls.iter().find(|u| u.starts_with("https://corsproxy.io")).unwrap();
        assert!(corsproxy.contains("%3A%2F%2F"));
        assert!(!corsproxy.contains("&limit="));

        let path_style = urls.iter().find(|u| u.starts_with("https://cors.eu.org")).unwrap();
        assert!(path_style.ends_with("anime?q=naruto&limit=5"));
    }
}
