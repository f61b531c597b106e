//! Answer-time chunk ranking.
//!
//! Scores every embedded chunk of a document against the query vector
//! and keeps the top-k. Ranking is deterministic: equal scores resolve
//! to the chunk that appears earlier in the document.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use docqa_doc_store::DocumentIndex;
use docqa_embeddings::cosine_similarity;

use crate::error::{PipelineError, Result};

/// A chunk scored against a query, produced only during ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The chunk text.
    pub text: String,

    /// Position of the chunk within the document.
    pub sequence_index: usize,

    /// Cosine similarity against the query vector.
    pub score: f32,
}

/// Rank the chunks of `index` against `query` and return the top `k`,
/// highest score first.
///
/// Fails with `InvalidArgument` when `k` is zero and with a dimension
/// mismatch when the query vector's length differs from the stored
/// vectors. A `k` larger than the chunk count returns every chunk,
/// ranked; an empty index returns an empty sequence.
pub fn top_k(query: &[f32], index: &DocumentIndex, k: usize) -> Result<Vec<ScoredChunk>> {
    if k == 0 {
        return Err(PipelineError::InvalidArgument(
            "retrieval breadth k must be positive".to_string(),
        ));
    }

    let mut scored: Vec<ScoredChunk> = Vec::with_capacity(index.len());
    for embedded in &index.chunks {
        let score = cosine_similarity(query, &embedded.embedding)?;
        scored.push(ScoredChunk {
            text: embedded.chunk.text.clone(),
            sequence_index: embedded.chunk.sequence_index,
            score,
        });
    }

    // Stable sort: equal scores keep document order
    scored.sort_by(|a, b| OrderedFloat(b.score).cmp(&OrderedFloat(a.score)));
    scored.truncate(k);

    Ok(scored)
}

/// Join ranked chunk texts into the generation context.
///
/// Chunks are concatenated in rank order — not document order — so the
/// most relevant material leads the context handed to the generator.
pub fn build_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_doc_store::{Chunk, EmbeddedChunk};
    use pretty_assertions::assert_eq;

    fn index_of(vectors: Vec<Vec<f32>>) -> DocumentIndex {
        let chunks = vectors
            .into_iter()
            .enumerate()
            .map(|(i, v)| EmbeddedChunk::new(Chunk::new(format!("chunk {i}"), i), v))
            .collect();
        DocumentIndex::new(chunks, "test-model")
    }

    #[test]
    fn test_ranks_highest_score_first() {
        let index = index_of(vec![
            vec![0.0, 1.0], // orthogonal to query
            vec![1.0, 0.0], // identical to query
            vec![0.7, 0.7], // in between
        ]);

        let results = top_k(&[1.0, 0.0], &index, 3).unwrap();

        let order: Vec<usize> = results.iter().map(|c| c.sequence_index).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert!((results[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_exact_tie_resolves_to_earlier_chunk() {
        let index = index_of(vec![vec![1.0, 0.0], vec![1.0, 0.0]]);

        let results = top_k(&[1.0, 0.0], &index, 1).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sequence_index, 0);
    }

    #[test]
    fn test_tie_break_is_deterministic_across_calls() {
        let index = index_of(vec![vec![0.5, 0.5], vec![0.5, 0.5], vec![0.5, 0.5]]);

        let first = top_k(&[1.0, 1.0], &index, 3).unwrap();
        for _ in 0..10 {
            let again = top_k(&[1.0, 1.0], &index, 3).unwrap();
            let a: Vec<usize> = first.iter().map(|c| c.sequence_index).collect();
            let b: Vec<usize> = again.iter().map(|c| c.sequence_index).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_k_larger_than_chunk_count_returns_all() {
        let index = index_of(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);

        let results = top_k(&[1.0, 0.0], &index, 10).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_empty_index_returns_empty() {
        let index = index_of(vec![]);

        let results = top_k(&[1.0, 0.0], &index, 2).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_zero_k_is_rejected() {
        let index = index_of(vec![vec![1.0, 0.0]]);

        let err = top_k(&[1.0, 0.0], &index, 0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArgument(_)));
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let index = index_of(vec![vec![1.0, 0.0, 0.0]]);

        let err = top_k(&[1.0, 0.0], &index, 1).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Embedding(
                docqa_embeddings::EmbeddingError::DimensionMismatch { .. }
            )
        ));
    }

    #[test]
    fn test_build_context_joins_in_rank_order() {
        let chunks = vec![
            ScoredChunk {
                text: "most relevant".to_string(),
                sequence_index: 3,
                score: 0.9,
            },
            ScoredChunk {
                text: "second best".to_string(),
                sequence_index: 0,
                score: 0.4,
            },
        ];

        assert_eq!(build_context(&chunks), "most relevant\n\nsecond best");
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(&[]), "");
    }
}
