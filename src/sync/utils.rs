//! Utility functions for common operations

use crate::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Markup the aggregator renders as a line break
pub const LINE_BREAK: &str = "<br />";

/// Sentinel the source uses for unverified yes/no answers
pub const UNKNOWN: &str = "Unknown";

/// Build the HTTP client used for the listings API
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Replace every CR and every LF with `<br />`, independently.
/// A CRLF pair therefore becomes two breaks.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace('\r', LINE_BREAK).replace('\n', LINE_BREAK)
}

/// Anything but an exact "No" counts as a mixed breed
pub fn mixed_breed_flag(value: Option<&str>) -> &'static str {
    match value {
        Some("No") => "No",
        _ => "Yes",
    }
}

/// Clear a cell holding exactly the "Unknown" sentinel; true if it was cleared
pub fn blank_unknown(value: &mut String) -> bool {
    if *value == UNKNOWN {
        value.clear();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_breaks() {
        assert_eq!(normalize_line_breaks("a\n\r"), "a<br /><br />");
        assert_eq!(normalize_line_breaks("a\r\nb"), "a<br /><br />b");
        assert_eq!(normalize_line_breaks("one\ntwo"), "one<br />two");
        assert_eq!(normalize_line_breaks("plain"), "plain");
        assert_eq!(normalize_line_breaks(""), "");
    }

    #[test]
    fn test_mixed_breed_flag() {
        assert_eq!(mixed_breed_flag(Some("No")), "No");
        assert_eq!(mixed_breed_flag(Some("Yes")), "Yes");
        assert_eq!(mixed_breed_flag(Some("Unknown")), "Yes");
        assert_eq!(mixed_breed_flag(Some("no")), "Yes");
        assert_eq!(mixed_breed_flag(None), "Yes");
    }

    #[test]
    fn test_blank_unknown() {
        let mut value = "Unknown".to_string();
        assert!(blank_unknown(&mut value));
        assert_eq!(value, "");

        let mut value = "unknown".to_string();
        assert!(!blank_unknown(&mut value));
        assert_eq!(value, "unknown");

        let mut value = "Yes".to_string();
        assert!(!blank_unknown(&mut value));
        assert_eq!(value, "Yes");
    }
}
