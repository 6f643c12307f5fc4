//! Splitting long replies to fit Telegram's message-size limit.

/// Split `text` into ordered chunks of at most `limit` characters.
///
/// Content is preserved exactly: concatenating the chunks reproduces the
/// input. Counting is by Unicode scalar, so chunks never split a character.
/// An empty input yields no chunks.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut count = 0;

    for c in text.chars() {
        chunk.push(c);
        count += 1;
        if count == limit {
            chunks.push(std::mem::take(&mut chunk));
            count = 0;
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        assert_eq!(split_message("hello", 4000), vec!["hello"]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_message("", 4000).is_empty());
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let text = "abcdefghij".repeat(137);
        for limit in [1, 7, 100, 4000, 10_000] {
            let chunks = split_message(&text, limit);
            assert_eq!(chunks.concat(), text, "limit {limit}");
        }
    }

    #[test]
    fn test_all_chunks_within_limit() {
        let text = "x".repeat(9001);
        let chunks = split_message(&text, 4000);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 4000);
        }
    }

    #[test]
    fn test_only_final_chunk_may_be_shorter() {
        let chunks = split_message(&"y".repeat(10), 3);
        assert_eq!(chunks, vec!["yyy", "yyy", "yyy", "y"]);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_chunk() {
        let chunks = split_message(&"z".repeat(12), 4);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 4));
    }

    #[test]
    fn test_no_word_boundary_trimming() {
        let chunks = split_message("one two three", 5);
        assert_eq!(chunks, vec!["one t", "wo th", "ree"]);
    }

    #[test]
    fn test_multibyte_characters_not_split() {
        let text = "健康第一です🍎".repeat(50);
        let chunks = split_message(&text, 7);
        assert_eq!(chunks.concat(), text);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 7);
        }
    }
}
