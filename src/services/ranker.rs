use crate::services::vectorizer::{SparseVector, VectorIndex};

/// Cosine similarity of two non-negative rows, clamped to `[0, 1]`.
/// A zero vector is similar to nothing.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Scores every row against `query_index` and returns the best `top_n`
/// `(row, score)` pairs, excluding the query row itself.
///
/// Ordering is by score descending, then by row index ascending. A query
/// index outside the index yields no results.
pub fn rank(index: &VectorIndex, query_index: usize, top_n: i64) -> Vec<(usize, f64)> {
    if top_n <= 0 {
        return Vec::new();
    }
    let Some(query) = index.row(query_index) else {
        return Vec::new();
    };

    let mut scored: Vec<(usize, f64)> = index
        .rows()
        .iter()
        .enumerate()
        .map(|(row, vector)| (row, cosine_similarity(query, vector)))
        .collect();

    // Stable sort keeps original row order among equal scores
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .filter(|(row, _)| *row != query_index)
        .take(usize::try_from(top_n).unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::vectorizer::TfidfVectorizer;

    fn index(docs: &[&str]) -> VectorIndex {
        TfidfVectorizer::new().build(docs).unwrap()
    }

    #[test]
    fn test_more_shared_vocabulary_ranks_higher() {
        let idx = index(&["A Action hero fights", "B Action hero fights villain", "C Comedy funny clown"]);
        let ranked = rank(&idx, 0, 2);
        assert_eq!(ranked.iter().map(|(r, _)| *r).collect::<Vec<_>>(), vec![1, 2]);
        assert!(ranked[0].1 > 0.0);
        assert_eq!(ranked[1].1, 0.0);
    }

    #[test]
    fn test_excludes_query_and_clamps_count() {
        let idx = index(&["hero fights", "hero villain", "funny clown"]);
        let ranked = rank(&idx, 1, 10);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|(r, _)| *r != 1));
    }

    #[test]
    fn test_non_positive_top_n_is_empty() {
        let idx = index(&["hero fights", "hero villain"]);
        assert!(rank(&idx, 0, 0).is_empty());
        assert!(rank(&idx, 0, -3).is_empty());
    }

    #[test]
    fn test_ties_keep_row_order() {
        let idx = index(&["space pirates", "desert war", "space pirates", "space pirates"]);
        let ranked = rank(&idx, 0, 3);
        assert_eq!(ranked.iter().map(|(r, _)| *r).collect::<Vec<_>>(), vec![2, 3, 1]);
        assert_eq!(ranked[0].1, ranked[1].1);
    }

    #[test]
    fn test_scores_descend_and_stay_in_range() {
        let idx = index(&[
            "space pirates adventure",
            "space adventure",
            "pirates treasure adventure",
            "cooking show",
            "space station drama",
        ]);
        let ranked = rank(&idx, 0, 4);
        for pair in ranked.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        assert!(ranked.iter().all(|(_, s)| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_zero_query_row_scores_zero_everywhere() {
        let idx = index(&["", "hero fights", "funny clown"]);
        let ranked = rank(&idx, 0, 5);
        assert_eq!(ranked, vec![(1, 0.0), (2, 0.0)]);
    }

    #[test]
    fn test_identical_rows_score_one() {
        let idx = index(&["hero fights", "hero fights"]);
        let score = cosine_similarity(idx.row(0).unwrap(), idx.row(1).unwrap());
        assert!((score - 1.0).abs() < 1e-12);
    }
}
