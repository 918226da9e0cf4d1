//! Paragraph-greedy text chunking with overlap

use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Text chunker with configurable size and overlap.
///
/// Chunks are built by greedily accumulating whole paragraphs; consecutive
/// chunks from the same document share a trailing/leading window of `overlap`
/// characters so context is not lost at split boundaries.
pub struct TextChunker {
    /// Maximum chunk size in characters
    max_chars: usize,
    /// Overlap between chunks in characters
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(max_chars: usize, overlap: usize) -> Self {
        Self { max_chars, overlap }
    }

    /// Split cleaned document text into chunks.
    ///
    /// A single paragraph longer than `max_chars` is emitted as its own
    /// oversized chunk rather than being cut mid-sentence.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let paragraphs: Vec<&str> = PARAGRAPH_SPLIT
            .split(text)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let mut chunks: Vec<String> = Vec::new();
        let mut buf = String::new();

        for paragraph in paragraphs {
            if buf.is_empty() {
                buf = paragraph.to_string();
            } else if char_len(&buf) + 2 + char_len(paragraph) <= self.max_chars {
                buf.push_str("\n\n");
                buf.push_str(paragraph);
            } else {
                let tail = tail_chars(&buf, self.overlap).to_string();
                chunks.push(buf);
                buf = if tail.is_empty() {
                    paragraph.to_string()
                } else {
                    format!("{tail}\n\n{paragraph}").trim().to_string()
                };
            }
        }

        if !buf.is_empty() {
            chunks.push(buf);
        }

        chunks
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The trailing `n` characters of `s`, on a char boundary.
fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let total = char_len(s);
    if total <= n {
        return s;
    }
    let (idx, _) = s.char_indices().nth(total - n).expect("index in range");
    &s[idx..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(label: &str, len: usize) -> String {
        let mut p = format!("{label} ");
        while p.len() < len {
            p.push_str("word ");
        }
        p.truncate(len);
        p.trim_end().to_string()
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunker = TextChunker::new(800, 140);
        let chunks = chunker.chunk("one paragraph\n\nanother paragraph");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "one paragraph\n\nanother paragraph");
    }

    #[test]
    fn no_chunk_exceeds_max_chars() {
        let chunker = TextChunker::new(200, 40);
        let text = (0..10)
            .map(|i| paragraph(&format!("p{i}"), 90))
            .collect::<Vec<_>>()
            .join("\n\n");

        for chunk in chunker.chunk(&text) {
            assert!(chunk.chars().count() <= 200 + 40 + 2, "chunk too large");
        }
    }

    #[test]
    fn adjacent_chunks_share_the_overlap_window() {
        let chunker = TextChunker::new(200, 40);
        let text = (0..8)
            .map(|i| paragraph(&format!("p{i}"), 90))
            .collect::<Vec<_>>()
            .join("\n\n");

        let chunks = chunker.chunk(&text);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail = tail_chars(&pair[0], 40).trim_start();
            assert!(
                pair[1].starts_with(tail),
                "overlap missing between chunks: {tail:?}"
            );
        }
    }

    #[test]
    fn oversized_paragraph_is_emitted_whole() {
        let chunker = TextChunker::new(100, 20);
        let big = paragraph("big", 500);
        let text = format!("small one\n\n{big}\n\nsmall two");

        let chunks = chunker.chunk(&text);
        assert!(chunks.iter().any(|c| c.contains("big") && c.chars().count() >= 400));
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(800, 140);
        assert!(chunker.chunk("").is_empty());
    }
}
