//! Utility functions for formatting and parsing

use chrono::Duration;
use teloxide::utils::html;

use crate::error::{BotError, BotResult};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

/// Format an elapsed duration as `H:MM:SS`, prefixed with whole days
pub fn format_runtime(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    match days {
        0 => format!("{}:{:02}:{:02}", hours, minutes, secs),
        1 => format!("1 day, {}:{:02}:{:02}", hours, minutes, secs),
        _ => format!("{} days, {}:{:02}:{:02}", days, hours, minutes, secs),
    }
}

/// Parse command arguments from message text
pub fn parse_args(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Validate and extract a Telegram user ID
pub fn parse_user_id(raw: &str) -> BotResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| BotError::InvalidArguments(format!("{} is not a valid user ID", raw.trim())))
}

/// Turn literal `\n` sequences typed by users into real line breaks
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// HTML mention linking to a user's profile
pub fn mention_html(user_id: i64, name: &str) -> String {
    format!("<a href=\"tg://user?id={}\">{}</a>", user_id, html::escape(name))
}

/// Escaped inline code span
pub fn code(text: &str) -> String {
    format!("<code>{}</code>", html::escape(text))
}

/// Telegram user ID as stored in the database
pub fn user_id_of(user: &teloxide::types::User) -> i64 {
    user.id.0 as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(536870912), "512.00 MB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
        assert_eq!(format_bytes(1099511627776), "1.00 TB");
        assert_eq!(format_bytes(u64::MAX), "16.00 EB");
    }

    #[test]
    fn test_format_bytes_is_monotonic() {
        const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

        let rank = |formatted: String| -> (usize, f64) {
            let (value, unit) = formatted.split_once(' ').unwrap();
            let unit_index = UNITS.iter().position(|u| *u == unit).unwrap();
            (unit_index, value.parse::<f64>().unwrap())
        };

        let mut previous = rank(format_bytes(0));
        let mut bytes = 1u64;
        while bytes < 1 << 40 {
            for sample in [bytes, bytes + bytes / 3, bytes * 2 - 1] {
                let current = rank(format_bytes(sample));
                assert!(current >= previous, "{} formatted out of order", sample);
                previous = current;
            }
            bytes *= 2;
        }
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(Duration::seconds(0)), "0:00:00");
        assert_eq!(format_runtime(Duration::seconds(59)), "0:00:59");
        assert_eq!(format_runtime(Duration::seconds(3661)), "1:01:01");
        assert_eq!(format_runtime(Duration::seconds(86_400 + 5)), "1 day, 0:00:05");
        assert_eq!(format_runtime(Duration::seconds(3 * 86_400 + 7200)), "3 days, 2:00:00");
        assert_eq!(format_runtime(Duration::seconds(-10)), "0:00:00");
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(""), Vec::<&str>::new());
        assert_eq!(parse_args("123"), vec!["123"]);
        assert_eq!(parse_args("  123   456 "), vec!["123", "456"]);
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("12345").unwrap(), 12345);
        assert_eq!(parse_user_id(" -100 ").unwrap(), -100);
        assert!(parse_user_id("abc").is_err());
        assert!(parse_user_id("").is_err());
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("Hello\\nWorld"), "Hello\nWorld");
        assert_eq!(normalize_newlines("plain"), "plain");
    }

    #[test]
    fn test_mention_and_code_escape() {
        assert_eq!(
            mention_html(42, "Tom & <Jerry>"),
            "<a href=\"tg://user?id=42\">Tom &amp; &lt;Jerry&gt;</a>"
        );
        assert_eq!(code("a<b"), "<code>a&lt;b</code>");
    }
}
