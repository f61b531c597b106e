//! Paragraph-boundary document chunking.
//!
//! Chunks are built by greedily packing whole paragraphs up to a target
//! size, never by hard character cuts. This keeps each chunk semantically
//! coherent at the cost of variable, sometimes-oversized chunk length.

use docqa_doc_store::Chunk;

/// Paragraph separator used both for splitting input and for joining
/// paragraphs back into a chunk.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Splits extracted text into bounded-size chunks on paragraph boundaries.
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    /// Target maximum chunk size in characters.
    max_chars: usize,
}

impl ParagraphChunker {
    /// Create a chunker with the given target size.
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Split `text` into ordered chunks.
    ///
    /// Paragraphs are accumulated into a running buffer; the buffer is
    /// closed whenever appending the next paragraph would push it past
    /// the target size and it already holds content. A single paragraph
    /// larger than the target is not split further — it becomes an
    /// oversized chunk of its own. Empty input yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut buffer = String::new();

        for paragraph in text.split(PARAGRAPH_SEPARATOR) {
            if paragraph.trim().is_empty() {
                continue;
            }

            if buffer.len() + paragraph.len() > self.max_chars && !buffer.is_empty() {
                chunks.push(Chunk::new(std::mem::take(&mut buffer), chunks.len()));
            }

            if !buffer.is_empty() {
                buffer.push_str(PARAGRAPH_SEPARATOR);
            }
            buffer.push_str(paragraph);
        }

        if !buffer.is_empty() {
            chunks.push(Chunk::new(buffer, chunks.len()));
        }

        chunks
    }
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CHUNK_CHARS)
    }
}
