//! Chunking of raw model output into displayable suggestions.
//!
//! The model's reply has no guaranteed structure, so parsing is
//! best-effort text splitting. It sits behind a trait so a structured
//! output mode (labeled fields, JSON) can replace it later without
//! touching the request flow.

/// Splits one raw model reply into per-book suggestion chunks
pub trait SuggestionParser: Send + Sync {
    fn parse(&self, raw: &str) -> Vec<String>;
}

/// Splits on blank-line boundaries
///
/// The prompt asks the model for a blank line between books; everything
/// between boundaries passes through untouched apart from trimming.
/// Whitespace-only chunks are dropped, so the output never contains an
/// empty suggestion.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankLineChunker;

impl SuggestionParser for BlankLineChunker {
    fn parse(&self, raw: &str) -> Vec<String> {
        raw.replace("\r\n", "\n")
            .split("\n\n")
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_blank_lines() {
        let raw = "Title: Dune\nAuthor: Frank Herbert\n\nTitle: Hyperion\nAuthor: Dan Simmons";
        let chunks = BlankLineChunker.parse(raw);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].starts_with("Title: Dune"));
        assert!(chunks[1].starts_with("Title: Hyperion"));
    }

    #[test]
    fn test_normalizes_windows_line_endings() {
        let raw = "Book one\r\n\r\nBook two";
        let chunks = BlankLineChunker.parse(raw);
        assert_eq!(chunks, vec!["Book one".to_string(), "Book two".to_string()]);
    }

    #[test]
    fn test_drops_whitespace_only_chunks() {
        let raw = "Book one\n\n   \n\nBook two\n\n";
        let chunks = BlankLineChunker.parse(raw);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn test_reply_without_blank_lines_is_one_chunk() {
        let chunks = BlankLineChunker.parse("1. Dune\n2. Hyperion\n3. Foundation");
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty_reply_yields_no_chunks() {
        assert!(BlankLineChunker.parse("").is_empty());
        assert!(BlankLineChunker.parse("\n\n\n\n").is_empty());
    }
}
