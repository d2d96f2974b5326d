use url::form_urlencoded;

pub const MAGNET_PREFIX: &str = "magnet:?";

/// Builds magnet links against a fixed tracker list.
#[derive(Debug, Clone, Copy)]
pub struct MagnetBuilder<'a> {
    trackers: &'a [String],
}

impl<'a> MagnetBuilder<'a> {
    pub fn new(trackers: &'a [String]) -> Self {
        Self { trackers }
    }

    pub fn trackers(&self) -> &'a [String] {
        self.trackers
    }

    /// `magnet:?xt=urn:btih:<hash>&dn=<title>&tr=<tracker>...`
    ///
    /// `xt` and `dn` are form-urlencoded, tracker entries are appended
    /// untouched. A missing title still produces an empty `dn`.
    pub fn build(&self, hash: &str, title: Option<&str>) -> String {
        let mut query = form_urlencoded::Serializer::for_suffix(
            String::from(MAGNET_PREFIX),
            MAGNET_PREFIX.len(),
        );
        query.append_pair("xt", &format!("urn:btih:{}", hash));
        query.append_pair("dn", title.unwrap_or_default());
        let mut magnet = query.finish();

        for tracker in self.trackers {
            magnet.push_str("&tr=");
            magnet.push_str(tracker);
        }

        magnet
    }
}

pub fn build_magnet(hash: &str, title: Option<&str>, trackers: &[String]) -> String {
    MagnetBuilder::new(trackers).build(hash, title)
}

/// Escape a plain announce URL (`udp://host:port/announce`) into the form
/// expected in a tracker list.
pub fn encode_tracker(announce: &str) -> String {
    form_urlencoded::byte_serialize(announce.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::trackers::default_trackers;

    #[test]
    fn test_magnet_without_trackers() {
        let magnet = build_magnet("abc123", Some("Some Title"), &[]);
        assert_eq!(magnet, "magnet:?xt=urn%3Abtih%3Aabc123&dn=Some+Title");
        assert!(!magnet.contains("tr="));
    }

    #[test]
    fn test_magnet_tracker_order_and_count() {
        let trackers = vec![
            "udp%3A%2F%2Fone.example%3A80".to_string(),
            "udp%3A%2F%2Ftwo.example%3A80".to_string(),
            "udp%3A%2F%2Fthree.example%3A80".to_string(),
        ];
        let magnet = build_magnet("abc", Some("t"), &trackers);

        let values: Vec<&str> = magnet
            .trim_start_matches(MAGNET_PREFIX)
            .split('&')
            .filter_map(|pair| pair.strip_prefix("tr="))
            .collect();
        assert_eq!(values, trackers);
    }

    #[test]
    fn test_magnet_does_not_double_escape_trackers() {
        let trackers = default_trackers();
        let magnet = build_magnet("abc", Some("t"), &trackers);
        assert!(magnet.contains("&tr=udp%3A%2F%2Ftracker.opentrackr.org%3A1337%2Fannounce"));
        assert!(!magnet.contains("%253A"));
        assert_eq!(magnet.matches("&tr=").count(), trackers.len());
    }

    #[test]
    fn test_magnet_escapes_reserved_title_characters() {
        let magnet = build_magnet("abc", Some("A&B=C/D?"), &[]);
        assert!(magnet.ends_with("&dn=A%26B%3DC%2FD%3F"));
        assert_eq!(magnet.matches('&').count(), 1);
    }

    #[test]
    fn test_magnet_query_starts_without_separator() {
        let magnet = build_magnet("h", Some("Ünï çødé & co"), &[]);
        assert_eq!(
            magnet,
            "magnet:?xt=urn%3Abtih%3Ah&dn=%C3%9Cn%C3%AF+%C3%A7%C3%B8d%C3%A9+%26+co"
        );
        assert!(!magnet.starts_with("magnet:?&"));
    }

    #[test]
    fn test_magnet_with_missing_title() {
        let magnet = build_magnet("abc", None, &[]);
        assert_eq!(magnet, "magnet:?xt=urn%3Abtih%3Aabc&dn=");
    }

    #[test]
    fn test_magnet_has_no_legacy_dollar_prefix() {
        let magnet = build_magnet("abc", Some("x"), &default_trackers());
        assert!(magnet.starts_with("magnet:?xt="));
        assert!(!magnet.contains('$'));
    }

    #[test]
    fn test_encode_tracker_round_trips_with_default_form() {
        assert_eq!(
            encode_tracker("udp://tracker.opentrackr.org:1337/announce"),
            "udp%3A%2F%2Ftracker.opentrackr.org%3A1337%2Fannounce"
        );
    }
}
