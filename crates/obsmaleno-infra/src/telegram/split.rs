//! Splitting replies to fit Telegram's per-message length limit.

/// Maximum length of one text message, in UTF-16 code units as Telegram
/// counts it.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Split `text` into chunks of at most `limit` UTF-16 code units.
///
/// Prefers to break after the last newline inside the window, then after
/// the last space, and only cuts mid-word when a window has neither.
/// Never splits inside a UTF-8 character.
pub fn split_message(text: &str, limit: usize) -> Vec<&str> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let window_end = match window_end(rest, limit) {
            Some(end) => end,
            None => {
                chunks.push(rest);
                break;
            }
        };

        let window = &rest[..window_end];
        let cut = window
            .rfind('\n')
            .or_else(|| window.rfind(' '))
            .map(|idx| idx + 1)
            .unwrap_or(window_end);

        chunks.push(&rest[..cut]);
        rest = &rest[cut..];
    }

    chunks
}

/// Byte offset of the first character that would push the window past
/// `limit` UTF-16 units, or `None` when all of `text` fits. Always admits
/// at least one character.
fn window_end(text: &str, limit: usize) -> Option<usize> {
    let mut units = 0;
    for (idx, c) in text.char_indices() {
        units += c.len_utf16();
        if units > limit {
            return Some(if idx == 0 { c.len_utf8() } else { idx });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_message("Привіт!", MAX_MESSAGE_CHARS), vec!["Привіт!"]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(split_message("", 10).is_empty());
    }

    #[test]
    fn test_exact_limit_is_one_chunk() {
        let text = "а".repeat(10);
        assert_eq!(split_message(&text, 10), vec![text.as_str()]);
    }

    #[test]
    fn test_prefers_newline_boundary() {
        let chunks = split_message("перший рядок\nдругий", 15);
        assert_eq!(chunks, vec!["перший рядок\n", "другий"]);
    }

    #[test]
    fn test_falls_back_to_space() {
        let chunks = split_message("кава чай какао", 10);
        assert_eq!(chunks, vec!["кава чай ", "какао"]);
    }

    #[test]
    fn test_hard_cut_without_whitespace() {
        let text = "ж".repeat(25);
        let chunks = split_message(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunks_reassemble_and_respect_limit() {
        let text = "Colombia Supremo — шоколад, горіх, карамель.\n".repeat(200);
        let chunks = split_message(&text, MAX_MESSAGE_CHARS);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_MESSAGE_CHARS));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_limit_counts_utf16_units() {
        // Each emoji is two UTF-16 units.
        let text = "☕".repeat(3) + &"🫘".repeat(4);
        let chunks = split_message(&text, 6);
        assert_eq!(chunks, vec!["☕☕☕🫘", "🫘🫘🫘"]);
        assert!(
            chunks
                .iter()
                .all(|c| c.encode_utf16().count() <= 6)
        );
    }

    #[test]
    fn test_wide_char_over_tiny_limit_still_progresses() {
        let chunks = split_message("🫘🫘", 1);
        assert_eq!(chunks, vec!["🫘", "🫘"]);
    }
}
