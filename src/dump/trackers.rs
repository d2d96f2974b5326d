/// Announce URLs appended to every generated magnet link unless the client is
/// configured with its own list.
///
/// Entries are already percent-encoded and are copied into the `tr`
/// parameters verbatim.
pub const DEFAULT_TRACKERS: [&str; 21] = [
    "udp%3A%2F%2Ftracker.coppersurfer.tk%3A6969%2Fannounce",
    "udp%3A%2F%2Ftracker.opentrackr.org%3A1337%2Fannounce",
    "udp%3A%2F%2Ftracker.leechers-paradise.org%3A6969%2Fannounce",
    "udp%3A%2F%2Ftracker.pirateparty.gr%3A6969%2Fannounce",
    "udp%3A%2F%2Fexodus.desync.com%3A6969%2Fannounce",
    "udp%3A%2F%2Ftracker.internetwarriors.net%3A1337%2Fannounce",
    "udp%3A%2F%2Ftracker.zer0day.to%3A1337%2Fannounce",
    "udp%3A%2F%2Ftracker.torrent.eu.org%3A451%2Fannounce",
    "udp%3A%2F%2Ftracker.cyberia.is%3A6969%2Fannounce",
    "udp%3A%2F%2Fopen.stealth.si%3A80%2Fannounce",
    "udp%3A%2F%2Ftracker.tiny-vps.com%3A6969%2Fannounce",
    "udp%3A%2F%2Fipv4.tracker.harry.lu%3A80%2Fannounce",
    "udp%3A%2F%2Ftracker.open-internet.nl%3A6969%2Fannounce",
    "udp%3A%2F%2F9.rarbg.to%3A2710%2Fannounce",
    "udp%3A%2F%2F9.rarbg.me%3A2710%2Fannounce",
    "udp%3A%2F%2Ftracker.moeking.me%3A6969%2Fannounce",
    "udp%3A%2F%2Fopen.demonii.si%3A1337%2Fannounce",
    "udp%3A%2F%2Fdenis.stalker.upeer.me%3A6969%2Fannounce",
    "udp%3A%2F%2Fp4p.arenabg.com%3A1337%2Fannounce",
    "udp%3A%2F%2Ftracker.iamhansen.xyz%3A2000%2Fannounce",
    "udp%3A%2F%2Fexplodie.org%3A6969%2Fannounce",
];

/// Owned copy of [`DEFAULT_TRACKERS`] for a new client or config.
pub fn default_trackers() -> Vec<String> {
    DEFAULT_TRACKERS.iter().map(|t| t.to_string()).collect()
}

/// Check that a tracker entry can be spliced into a query string as-is.
pub fn is_pre_escaped(tracker: &str) -> bool {
    !tracker.is_empty()
        && !tracker.contains("://")
        && !tracker
            .chars()
            .any(|c| c == '&' || c == '#' || c == '=' || c.is_whitespace())
}
