//! Cosine similarity over dense feature vectors.

use ndarray::ArrayView1;

/// Cosine similarity as the normalized dot product.
///
/// Similarity involving an all-zero vector is defined as 0.0, never NaN;
/// zero vectors are a normal outcome for songs with no usable features.
pub fn cosine(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn self_similarity_is_one() {
        let v = array![0.3f32, 0.5, 0.2];
        assert!((cosine(v.view(), v.view()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let a = array![1.0f32, 0.0];
        let b = array![0.0f32, 1.0];
        assert_eq!(cosine(a.view(), b.view()), 0.0);
    }

    #[test]
    fn zero_vector_scores_zero_not_nan() {
        let a = array![0.0f32, 0.0];
        let b = array![1.0f32, 2.0];
        let sim = cosine(a.view(), b.view());
        assert_eq!(sim, 0.0);
        assert!(!sim.is_nan());
    }
}
