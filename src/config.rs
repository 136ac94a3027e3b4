//! Compile-time configuration
//!
//! Credentials live here instead of NVS so a lost device leaks nothing more
//! than a scoped read-only token. Replace the placeholders before flashing;
//! the firmware treats an unchanged token as "no token" and falls back to
//! generated data.

use crate::graph::DisplayGeometry;

/// GitHub account whose calendar is shown
pub const GITHUB_USER: &str = "ehippy";

/// Personal access token with `read:user` scope.
/// Left at the placeholder, the fetch is skipped entirely.
pub const GITHUB_TOKEN: &str = "your_github_personal_access_token";

/// GitHub GraphQL endpoint
pub const GITHUB_API_URL: &str = "https://api.github.com/graphql";

/// WiFi credentials, tried in order
pub const WIFI_NETWORKS: &[(&str, &str)] = &[("your_wifi_ssid", "your_wifi_password")];

/// Skip networking and render generated data. Handy on the desk.
pub const USE_FAKE_DATA: bool = true;

/// Seconds between display refreshes, once per day
pub const UPDATE_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Grid preset for the attached panel
pub const GEOMETRY: DisplayGeometry = DisplayGeometry::WIDE;

/// Draw the streak/total/best numbers next to the grid
pub const EXTENDED_OVERLAY: bool = true;

/// Returns the token, or None when it is missing or still the placeholder.
pub fn github_token() -> Option<&'static str> {
    if GITHUB_TOKEN.is_empty() || GITHUB_TOKEN == "your_github_personal_access_token" {
        None
    } else {
        Some(GITHUB_TOKEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_token_reads_as_absent() {
        assert!(github_token().is_none());
    }
}
