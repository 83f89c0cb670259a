//! Cosine similarity, normalized edit distance, and medoid selection.
//!
//! Pure numeric functions shared by the enrollment and verification paths.
//! No model state, no I/O.

/// Cosine similarity between two equal-length float32 vectors.
///
/// Returns `0.0` if either vector has zero norm, rather than dividing by
/// zero. Range is `[-1.0, 1.0]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let norm_a = (a.iter().map(|x| x * x).sum::<f32>()).sqrt();
    let norm_b = (b.iter().map(|x| x * x).sum::<f32>()).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}

/// Levenshtein distance divided by the longer sequence's length.
///
/// `0.0` when both sequences are empty, `1.0` when exactly one is empty.
/// The shorter sequence is placed on the DP row to keep memory at
/// `O(min(|a|, |b|))` — enrollment compares every pair of samples, so this
/// matters once sample counts grow.
pub fn normalized_edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> f32 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    if a.is_empty() || b.is_empty() {
        return 1.0;
    }

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut prev: Vec<u32> = (0..=short.len() as u32).collect();
    let mut curr = vec![0u32; short.len() + 1];

    for (i, long_item) in long.iter().enumerate() {
        curr[0] = i as u32 + 1;
        for (j, short_item) in short.iter().enumerate() {
            let cost = if long_item == short_item { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()] as f32 / long.len() as f32
}

/// Symmetric `n×n` pairwise distance matrix with a zero diagonal.
///
/// Only the upper triangle is computed; the lower triangle is mirrored.
pub fn pairwise_distance_matrix<T: PartialEq>(sequences: &[Vec<T>]) -> Vec<Vec<f32>> {
    let n = sequences.len();
    let mut matrix = vec![vec![0.0f32; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = normalized_edit_distance(&sequences[i], &sequences[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }
    matrix
}

/// Index of the element minimizing the sum of distances to all others.
///
/// Ties break to the lowest index. Returns `None` for an empty matrix.
pub fn medoid(distances: &[Vec<f32>]) -> Option<usize> {
    if distances.is_empty() {
        return None;
    }
    distances
        .iter()
        .map(|row| row.iter().sum::<f32>())
        .enumerate()
        .min_by(|(ia, a), (ib, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal).then(ia.cmp(ib)))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_identical_vector_is_one() {
        let v = [1.0f32, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_is_zero() {
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-6);
    }

    #[test]
    fn cosine_opposite_is_negative_one() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [-1.0f32, -2.0, -3.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_zero_vector_is_zero() {
        let a = [1.0f32, 2.0, 3.0];
        let z = [0.0f32, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &z), 0.0);
        assert_eq!(cosine_similarity(&z, &a), 0.0);
    }

    #[test]
    fn ned_identical_sequences_is_zero() {
        let seq = vec!["a", "b", "c"];
        assert_eq!(normalized_edit_distance(&seq, &seq), 0.0);
    }

    #[test]
    fn ned_both_empty_is_zero() {
        let empty: Vec<&str> = vec![];
        assert_eq!(normalized_edit_distance(&empty, &empty), 0.0);
    }

    #[test]
    fn ned_one_empty_is_one() {
        let empty: Vec<&str> = vec![];
        let a = vec!["a", "b"];
        assert_eq!(normalized_edit_distance(&a, &empty), 1.0);
        assert_eq!(normalized_edit_distance(&empty, &a), 1.0);
    }

    #[test]
    fn ned_partial_match() {
        let a = vec!["a", "b", "c"];
        let b = vec!["a", "b", "d"];
        assert!((normalized_edit_distance(&a, &b) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn ned_completely_different_is_one() {
        let a = vec!["a", "b", "c"];
        let b = vec!["x", "y", "z"];
        assert_eq!(normalized_edit_distance(&a, &b), 1.0);
    }

    #[test]
    fn ned_is_symmetric() {
        let a = vec!["a", "i", "u", "e", "o"];
        let b = vec!["k", "a", "u", "e", "o"];
        assert_eq!(normalized_edit_distance(&a, &b), normalized_edit_distance(&b, &a));
    }

    #[test]
    fn medoid_ties_break_to_lowest_index() {
        let distances = vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ];
        assert_eq!(medoid(&distances), Some(0));
    }

    #[test]
    fn medoid_picks_most_central_sequence() {
        let sequences = vec![
            vec!["a", "i", "u", "e", "o"],
            vec!["a", "i", "u", "e", "o"],
            vec!["a", "i", "u", "e", "a"],
        ];
        let matrix = pairwise_distance_matrix(&sequences);
        assert_eq!(medoid(&matrix), Some(0));
    }

    #[test]
    fn pairwise_matrix_has_zero_diagonal_and_is_symmetric() {
        let sequences = vec![vec!["a", "b"], vec!["a", "c"], vec!["x", "y"]];
        let matrix = pairwise_distance_matrix(&sequences);
        for i in 0..matrix.len() {
            assert_eq!(matrix[i][i], 0.0);
            for j in 0..matrix.len() {
                assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cosine_similarity_stays_in_unit_range(
            a in prop::collection::vec(-100.0f32..100.0, 1..16),
            b in prop::collection::vec(-100.0f32..100.0, 1..16),
        ) {
            let n = a.len().min(b.len());
            let score = cosine_similarity(&a[..n], &b[..n]);
            prop_assert!(score >= -1.0001 && score <= 1.0001);
        }

        #[test]
        fn cosine_similarity_is_symmetric(
            a in prop::collection::vec(-100.0f32..100.0, 1..16),
            b in prop::collection::vec(-100.0f32..100.0, 1..16),
        ) {
            let n = a.len().min(b.len());
            prop_assert_eq!(cosine_similarity(&a[..n], &b[..n]), cosine_similarity(&b[..n], &a[..n]));
        }

        #[test]
        fn normalized_edit_distance_stays_in_unit_range(
            a in prop::collection::vec(0u8..4, 0..12),
            b in prop::collection::vec(0u8..4, 0..12),
        ) {
            let d = normalized_edit_distance(&a, &b);
            prop_assert!((0.0..=1.0).contains(&d));
        }

        #[test]
        fn normalized_edit_distance_is_symmetric(
            a in prop::collection::vec(0u8..4, 0..12),
            b in prop::collection::vec(0u8..4, 0..12),
        ) {
            prop_assert_eq!(normalized_edit_distance(&a, &b), normalized_edit_distance(&b, &a));
        }
    }
}
