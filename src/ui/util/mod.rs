pub mod handler;

use unicode_width::UnicodeWidthStr;

pub fn get_active_track_icon(is_playing: bool) -> &'static str {
    if is_playing { "▶" } else { "⏸" }
}

pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Truncates to the given display width, appending an ellipsis when
/// anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if format!("{out}{c}").width() > max_width.saturating_sub(1) {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(180), "3:00");
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer name", 8), "a longe…");
    }
}
