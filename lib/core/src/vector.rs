use serde::{Deserialize, Serialize};

/// A record projected onto a [`FeatureSchema`](crate::FeatureSchema):
/// post-treatment columns are 0 or 1, sensory columns are integers in
/// [0, 10]. Stored as `f32` because user profiles (elementwise means of
/// several vectors) are fractional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: Vec<f32>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Cosine similarity with another vector.
    ///
    /// A zero-norm vector (a bottling with no discovered tags and no
    /// nonzero sensory score) yields 0.0, not a computation failure.
    /// Mismatched dimensions also yield 0.0; callers comparing vectors
    /// across schemas are expected to check schema identity first.
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let dot: f32 = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum();

        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a * norm_b)
    }

    /// Elementwise arithmetic mean of a set of vectors.
    ///
    /// Returns `None` for an empty set or mismatched dimensions.
    pub fn mean<'a, I>(vectors: I) -> Option<FeatureVector>
    where
        I: IntoIterator<Item = &'a FeatureVector>,
    {
        let mut iter = vectors.into_iter();
        let first = iter.next()?;
        let mut acc: Vec<f32> = first.data.clone();
        let mut count = 1usize;

        for v in iter {
            if v.dim() != acc.len() {
                return None;
            }
            for (a, b) in acc.iter_mut().zip(v.data.iter()) {
                *a += b;
            }
            count += 1;
        }

        let n = count as f32;
        for a in &mut acc {
            *a /= n;
        }
        Some(FeatureVector::new(acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_self_similarity_is_one() {
        let v = FeatureVector::new(vec![9.0, 2.0, 0.0]);
        assert!((v.cosine_similarity(&v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let v1 = FeatureVector::new(vec![1.0, 0.0]);
        let v2 = FeatureVector::new(vec![0.0, 1.0]);
        assert!((v1.cosine_similarity(&v2)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_similarity_is_zero() {
        let z = FeatureVector::zeros(3);
        let v = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(z.cosine_similarity(&v), 0.0);
        assert_eq!(v.cosine_similarity(&z), 0.0);
        assert_eq!(z.cosine_similarity(&z), 0.0);
    }

    #[test]
    fn test_dim_mismatch_is_zero() {
        let v1 = FeatureVector::new(vec![1.0, 2.0]);
        let v2 = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(v1.cosine_similarity(&v2), 0.0);
    }

    #[test]
    fn test_mean() {
        let v1 = FeatureVector::new(vec![2.0, 4.0]);
        let v2 = FeatureVector::new(vec![4.0, 8.0]);
        let mean = FeatureVector::mean([&v1, &v2]).unwrap();
        assert_eq!(mean.as_slice(), &[3.0, 6.0]);
    }

    #[test]
    fn test_mean_of_one_is_identity() {
        let v = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        let mean = FeatureVector::mean([&v]).unwrap();
        assert_eq!(mean, v);
    }

    #[test]
    fn test_mean_empty_is_none() {
        let vs: Vec<&FeatureVector> = vec![];
        assert!(FeatureVector::mean(vs).is_none());
    }
}
