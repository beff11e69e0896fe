//! Similarity ranking over pre-embedded corpora.

pub mod grouping;

pub use grouping::{group_by_gap, SegmentGroup};

use std::cmp::Ordering;

/// A corpus item paired with its similarity to the query.
#[derive(Debug, Clone)]
pub struct Ranked<T> {
    /// The matched corpus item.
    pub item: T,
    /// Cosine similarity to the query embedding (higher is better).
    pub score: f32,
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Score every item against the query embedding and keep the `top_k` best.
///
/// Sorted descending by score; ties keep their corpus order, so the ranking
/// is deterministic for a fixed query and corpus.
pub fn rank_top_k<T, F>(
    items: &[T],
    query_embedding: &[f32],
    top_k: usize,
    embedding_of: F,
) -> Vec<Ranked<T>>
where
    T: Clone,
    F: Fn(&T) -> &[f32],
{
    let mut ranked: Vec<Ranked<T>> = items
        .iter()
        .map(|item| Ranked {
            score: cosine_similarity(query_embedding, embedding_of(item)),
            item: item.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(top_k);

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_rank_top_k_orders_and_truncates() {
        let items = vec![
            ("far", vec![0.0, 1.0]),
            ("near", vec![1.0, 0.0]),
            ("mid", vec![1.0, 1.0]),
        ];
        let query = vec![1.0, 0.0];

        let ranked = rank_top_k(&items, &query, 2, |item| item.1.as_slice());

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item.0, "near");
        assert_eq!(ranked[1].item.0, "mid");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_rank_top_k_is_deterministic() {
        let items: Vec<Vec<f32>> = (0..10)
            .map(|i| vec![i as f32 / 10.0, 1.0 - i as f32 / 10.0])
            .collect();
        let query = vec![0.7, 0.3];

        let first = rank_top_k(&items, &query, 5, |item| item.as_slice());
        let second = rank_top_k(&items, &query, 5, |item| item.as_slice());

        let order = |ranked: &[Ranked<Vec<f32>>]| {
            ranked.iter().map(|r| r.item.clone()).collect::<Vec<_>>()
        };
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn test_rank_top_k_handles_short_corpus() {
        let items = vec![("only", vec![1.0, 0.0])];
        let ranked = rank_top_k(&items, &[1.0, 0.0], 14, |item| item.1.as_slice());
        assert_eq!(ranked.len(), 1);
    }
}
