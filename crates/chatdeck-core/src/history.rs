//! Outbound history window and title heuristics.

use chatdeck_types::{message::Message, wire::HistoryEntry};

/// Ellipsis appended to a title cut at the cap
pub const TITLE_ELLIPSIS: &str = "…";

/// The last `window` messages as wire entries, oldest first.
///
/// A hard cap on message count: individual messages are never shortened.
pub fn build_history_window(messages: &[Message], window: usize) -> Vec<HistoryEntry> {
    let start = messages.len().saturating_sub(window);
    messages[start..]
        .iter()
        .map(HistoryEntry::from_message)
        .collect()
}

/// Title derived from the first user text: whitespace collapsed, capped at
/// `max_chars` characters with an ellipsis when cut. `None` for blank text.
pub fn derive_title(text: &str, max_chars: usize) -> Option<String> {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return None;
    }

    if cleaned.chars().count() <= max_chars {
        return Some(cleaned);
    }

    let mut title: String = cleaned.chars().take(max_chars).collect();
    title.push_str(TITLE_ELLIPSIS);
    Some(title)
}
