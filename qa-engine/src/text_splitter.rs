//! Recursive character text splitter for document ingestion.
//!
//! Strategy:
//! - Prefer the largest separator (`"\n\n"` → `"\n"` → `" "`) that keeps
//!   pieces within `chunk_size`; recurse into oversized pieces with the
//!   remaining separators; fall back to character windows as a last resort.
//! - Separators stay attached to the piece they terminate, so the split
//!   pieces concatenate back to the input text exactly.
//! - Pieces are then merged greedily into chunks of at most `chunk_size`
//!   characters, with consecutive chunks sharing up to `chunk_overlap`
//!   trailing characters to preserve context across a cut boundary.
//!
//! The splitter is fully deterministic: same text + same config produces the
//! same ordered chunk sequence on every run.

use std::collections::VecDeque;

use crate::error::QaError;

/// Separator hierarchy, largest first. Character-level splitting is the
/// implicit last level.
const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// Deterministic chunker with a fixed size/overlap configuration.
#[derive(Clone, Debug)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    /// Default chunk size (characters) used by the assistant.
    pub const DEFAULT_CHUNK_SIZE: usize = 250;
    /// Default overlap (characters) between consecutive chunks.
    pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

    /// Creates a splitter, validating the configuration.
    ///
    /// # Errors
    /// Returns [`QaError::Config`] when `chunk_size` is zero or the overlap
    /// is not strictly smaller than the chunk size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, QaError> {
        if chunk_size == 0 {
            return Err(QaError::Config("chunk_size must be > 0".into()));
        }
        if chunk_overlap >= chunk_size {
            return Err(QaError::Config(format!(
                "chunk_overlap ({chunk_overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Splitter with the system defaults (250 / 50).
    pub fn with_defaults() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            chunk_overlap: Self::DEFAULT_CHUNK_OVERLAP,
        }
    }

    /// Configured chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Configured overlap in characters.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Splits `text` into overlapping chunks of at most `chunk_size` chars.
    ///
    /// Empty input produces an empty sequence, not an error.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let pieces = self.decompose(text, 0);
        self.merge(pieces)
    }

    /// Recursively breaks `text` into pieces of at most `chunk_size` chars,
    /// preferring the largest separator level that fits.
    fn decompose<'a>(&self, text: &'a str, level: usize) -> Vec<&'a str> {
        if text.chars().count() <= self.chunk_size {
            return vec![text];
        }
        if level >= SEPARATORS.len() {
            return char_pieces(text);
        }

        let mut out = Vec::new();
        for part in split_keep_separator(text, SEPARATORS[level]) {
            if part.chars().count() <= self.chunk_size {
                out.push(part);
            } else {
                out.extend(self.decompose(part, level + 1));
            }
        }
        out
    }

    /// Greedily merges pieces into chunks, carrying up to `chunk_overlap`
    /// trailing characters into the next chunk.
    fn merge(&self, pieces: Vec<&str>) -> Vec<String> {
        let mut chunks: Vec<String> = Vec::new();
        // (piece, char length) pairs forming the current window.
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut window_len = 0usize;

        for piece in pieces {
            let piece_len = piece.chars().count();

            if window_len + piece_len > self.chunk_size && !window.is_empty() {
                chunks.push(window.iter().map(|(s, _)| *s).collect());

                // Shrink the window to at most `chunk_overlap` chars, further
                // if the incoming piece still would not fit.
                while window_len > self.chunk_overlap
                    || (window_len + piece_len > self.chunk_size && window_len > 0)
                {
                    match window.pop_front() {
                        Some((_, dropped)) => window_len -= dropped,
                        None => break,
                    }
                }
            }

            window.push_back((piece, piece_len));
            window_len += piece_len;
        }

        if !window.is_empty() {
            chunks.push(window.iter().map(|(s, _)| *s).collect());
        }
        chunks
    }
}

/// Splits `text` by `sep`, keeping the separator attached to the piece it
/// terminates. Concatenating the pieces reproduces `text` exactly.
fn split_keep_separator<'a>(text: &'a str, sep: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (pos, m) in text.match_indices(sep) {
        let end = pos + m.len();
        out.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Last-resort decomposition: one piece per character, so the merge step can
/// realize exact character-level windows and overlaps.
fn char_pieces(text: &str) -> Vec<&str> {
    let mut out = Vec::with_capacity(text.len());
    let mut iter = text.char_indices().peekable();
    while let Some((start, _)) = iter.next() {
        let end = iter.peek().map(|(i, _)| *i).unwrap_or(text.len());
        out.push(&text[start..end]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rebuilds the original text by stripping the shared overlap between
    /// consecutive chunks (longest suffix/prefix match bounded by `overlap`).
    fn reconstruct(chunks: &[String], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(chunk);
                continue;
            }
            let max_k = overlap.min(chunk.chars().count());
            for k in (0..=max_k).rev() {
                let prefix: String = chunk.chars().take(k).collect();
                if out.ends_with(&prefix) {
                    out.extend(chunk.chars().skip(k));
                    break;
                }
            }
        }
        out
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let splitter = TextSplitter::with_defaults();
        assert!(splitter.split_text("").is_empty());
    }

    #[test]
    fn short_input_is_a_single_chunk() {
        let splitter = TextSplitter::with_defaults();
        let chunks = splitter.split_text("Winter term starts in January.");
        assert_eq!(chunks, vec!["Winter term starts in January.".to_string()]);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert!(TextSplitter::new(0, 0).is_err());
        assert!(TextSplitter::new(100, 100).is_err());
        assert!(TextSplitter::new(100, 250).is_err());
        assert!(TextSplitter::new(100, 20).is_ok());
    }

    #[test]
    fn no_chunk_exceeds_chunk_size() {
        let text = "Enrollment opens on the first Monday of the month.\n\n\
                    Bring your student card and a filled application form to room 214. \
                    The office is open from nine to five on weekdays, and closed on \
                    public holidays.\nLate applications require the dean's signature.\n\n\
                    Scholarship requests follow a separate procedure described on the \
                    faculty notice board next to the registrar.";
        for (size, overlap) in [(40, 10), (80, 20), (250, 50), (25, 0)] {
            let splitter = TextSplitter::new(size, overlap).unwrap();
            for chunk in splitter.split_text(text) {
                assert!(
                    chunk.chars().count() <= size,
                    "chunk of {} chars exceeds size {}",
                    chunk.chars().count(),
                    size
                );
            }
        }
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = "The library is open until midnight during the exam period. \
                    Group study rooms can be booked two weeks in advance.";
        let splitter = TextSplitter::new(60, 15).unwrap();
        assert_eq!(splitter.split_text(text), splitter.split_text(text));
    }

    #[test]
    fn overlap_stripping_reconstructs_the_original() {
        let text = "Dormitory fees are due by the fifth day of each month.\n\
                    Payments made later incur a small surcharge detailed in the \
                    housing contract.\n\nQuiet hours run from ten in the evening \
                    until seven in the morning on weekdays.";
        for (size, overlap) in [(50, 10), (70, 25), (30, 5)] {
            let splitter = TextSplitter::new(size, overlap).unwrap();
            let chunks = splitter.split_text(text);
            assert!(chunks.len() > 1, "expected multiple chunks for size {size}");
            assert_eq!(reconstruct(&chunks, overlap), text);
        }
    }

    #[test]
    fn unbroken_text_falls_back_to_character_windows() {
        let text = "A".repeat(1000);
        let splitter = TextSplitter::with_defaults();
        let chunks = splitter.split_text(&text);

        // stride = 250 - 50 = 200 → windows at 0, 200, 400, 600, 800.
        assert_eq!(chunks.len(), 5);
        for chunk in &chunks[..4] {
            assert_eq!(chunk.chars().count(), 250);
        }
        assert_eq!(chunks[4].chars().count(), 200);
        assert_eq!(reconstruct(&chunks, 50), text);
    }

    #[test]
    fn consecutive_chunks_share_overlap() {
        let text = "B".repeat(600);
        let splitter = TextSplitter::with_defaults();
        let chunks = splitter.split_text(&text);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(pair[0].chars().count() - 50).collect();
            assert!(pair[1].starts_with(&tail));
        }
    }

    #[test]
    fn paragraph_breaks_are_preferred_cut_points() {
        let text = "First paragraph about deadlines.\n\nSecond paragraph about fees.";
        let splitter = TextSplitter::new(40, 0).unwrap();
        let chunks = splitter.split_text(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "First paragraph about deadlines.\n\n");
        assert_eq!(chunks[1], "Second paragraph about fees.");
    }
}
