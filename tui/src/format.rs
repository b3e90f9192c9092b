use chrono::{DateTime, Datelike, Utc};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Short relative age for a task's creation time.
pub(crate) fn format_age(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }
    if then.year() == now.year() {
        then.format("%b %-d").to_string()
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

/// Cut `text` to at most `max_width` terminal cells, ending in `…` when cut.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    // Adjacent graphemes can measure wider together than apart.
    while out.width() > budget {
        let Some((cut, _)) = out.grapheme_indices(true).next_back() else {
            break;
        };
        out.truncate(cut);
    }
    out.push('…');
    out
}

/// Name text with control characters (newlines included) shown as spaces.
pub(crate) fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
