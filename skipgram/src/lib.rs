//! Skip-gram word embeddings trained with negative sampling.
//!
//! ```no_run
//! use skipgram::{TrainingOptions, Word2Vec};
//!
//! let sentences = vec![vec!["the", "quick", "brown", "fox"], vec!["the", "lazy", "dog"]];
//! let options = TrainingOptions {
//!     min_count: 1,
//!     ..TrainingOptions::default()
//! };
//! let model = Word2Vec::train(&sentences, options);
//! for (word, similarity) in model.most_similar("fox", 3)? {
//!     println!("{word}: {similarity:.4}");
//! }
//! # Ok::<(), skipgram::Error>(())
//! ```

mod error;
pub use error::{Error, Result};

pub mod corpus;

mod embeddings;
pub use embeddings::Embeddings;

mod model;
pub use model::{context_pairs, TrainingOptions, Word2Vec};

mod sampler;
pub use sampler::NegativeSampler;

mod trainer;
pub use trainer::{sigmoid, PairTrainer};

mod vocab;
pub use vocab::Vocabulary;

pub fn norm(v: &[f32]) -> f32 {
    v.iter().copied().map(|e| e * e).sum::<f32>().sqrt()
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(&a, &b)| a * b).sum()
}

/// Cosine of the angle between `a` and `b`. Zero if either vector is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        0.0
    } else {
        dot(a, b) / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
