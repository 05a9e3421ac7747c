// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sliding-window text chunking.
//!
//! Splits source documents into overlapping fixed-size windows for
//! independent embedding. Window size and overlap are counted in characters,
//! never bytes, so a window can never split a UTF-8 sequence.

/// Split `text` into windows of `chunk_size` characters, advancing by
/// `chunk_size - overlap` each step.
///
/// Each window is trimmed of surrounding whitespace; windows that trim to
/// nothing are dropped. Empty/whitespace-only input or a non-positive
/// `chunk_size` yields no chunks. The advance step is clamped to at least
/// one character so an overlap that meets or exceeds the window size cannot
/// loop forever.
///
/// Deterministic: identical inputs always produce the identical sequence,
/// ordered left to right by position in the source text.
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.trim().is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let step = chunk_size.saturating_sub(overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        start += step;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_and_whitespace_inputs_yield_nothing() {
        assert_eq!(chunk("", 512, 64), Vec::<String>::new());
        assert_eq!(chunk("   ", 512, 64), Vec::<String>::new());
        assert_eq!(chunk("\n\t  \n", 512, 64), Vec::<String>::new());
    }

    #[test]
    fn zero_chunk_size_yields_nothing() {
        assert_eq!(chunk("hello", 0, 0), Vec::<String>::new());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        assert_eq!(chunk("hello", 10, 0), vec!["hello"]);
    }

    #[test]
    fn no_overlap_partitions_text() {
        let chunks = chunk("abcdefghij", 4, 0);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn overlap_shares_characters_between_neighbors() {
        let chunks = chunk("abcdefgh", 4, 2);
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh", "gh"]);
    }

    #[test]
    fn overlap_equal_to_chunk_size_still_terminates() {
        let chunks = chunk("abcdef", 3, 3);
        // Forced step of 1: every suffix window of up to 3 chars.
        assert_eq!(chunks.len(), 6);
        assert_eq!(chunks[0], "abc");
        assert_eq!(chunks[5], "f");
    }

    #[test]
    fn overlap_larger_than_chunk_size_still_terminates() {
        let chunks = chunk("abcdef", 2, 10);
        assert!(!chunks.is_empty());
        assert_eq!(chunks[0], "ab");
    }

    #[test]
    fn windows_trim_whitespace_and_drop_blanks() {
        // Second window is entirely whitespace and must be dropped.
        let chunks = chunk("ab    cd", 2, 0);
        assert_eq!(chunks, vec!["ab", "cd"]);
    }

    #[test]
    fn multibyte_text_never_splits_codepoints() {
        let text = "héllo wörld ünïcode tèxt";
        for c in chunk(text, 5, 2) {
            assert!(c.chars().count() <= 5);
        }
    }

    proptest! {
        #[test]
        fn chunk_count_matches_window_arithmetic(
            text in "[a-z]{1,200}",
            chunk_size in 1usize..50,
            overlap in 0usize..50,
        ) {
            let chunks = chunk(&text, chunk_size, overlap);
            let step = chunk_size.saturating_sub(overlap).max(1);
            // No whitespace in the input, so no windows are dropped and the
            // count is exactly the number of window starts.
            let expected = text.chars().count().div_ceil(step);
            prop_assert_eq!(chunks.len(), expected);
        }

        #[test]
        fn every_chunk_fits_the_window(
            text in "\\PC{0,300}",
            chunk_size in 1usize..64,
            overlap in 0usize..64,
        ) {
            for c in chunk(&text, chunk_size, overlap) {
                prop_assert!(c.chars().count() <= chunk_size);
                prop_assert!(!c.trim().is_empty());
            }
        }

        #[test]
        fn chunking_is_deterministic(
            text in "\\PC{0,200}",
            chunk_size in 1usize..32,
            overlap in 0usize..32,
        ) {
            prop_assert_eq!(
                chunk(&text, chunk_size, overlap),
                chunk(&text, chunk_size, overlap)
            );
        }

        #[test]
        fn chunk_starts_strictly_increase(
            text in "[a-y]{1,120}",
            chunk_size in 2usize..20,
            overlap in 0usize..10,
        ) {
            // With distinct window starts, each chunk begins at a strictly
            // later source offset than its predecessor.
            let chunks = chunk(&text, chunk_size, overlap);
            let step = chunk_size.saturating_sub(overlap).max(1);
            for (i, c) in chunks.iter().enumerate() {
                let start = i * step;
                let window: String = text.chars().skip(start).take(chunk_size).collect();
                prop_assert_eq!(c.as_str(), window.trim());
            }
        }
    }
}
