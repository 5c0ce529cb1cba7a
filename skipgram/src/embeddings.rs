use std::ops::Index;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// The trainable parameters: one input ("center") and one output ("context")
/// vector per vocabulary word.
///
/// Vectors are never normalized; callers that want cosine similarity have
/// to divide by the norms themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Embeddings {
    /// Embedding vector length (number of dimensions).
    dimension: usize,

    /// Number of rows in each matrix.
    num_words: usize,

    /// `input[k * dimension..(k+1) * dimension]` is the embedding for word `k`.
    input: Vec<f32>,

    /// Same layout as `input`; weights for word `k` in the context role.
    output: Vec<f32>,
}

impl Embeddings {
    /// Allocate both matrices, each entry drawn uniformly from
    /// `[-0.5 / dimension, 0.5 / dimension]`.
    pub fn new<R: Rng + ?Sized>(num_words: usize, dimension: usize, rng: &mut R) -> Self {
        let n = num_words * dimension;
        if n == 0 {
            return Embeddings {
                dimension,
                num_words,
                input: vec![],
                output: vec![],
            };
        }

        let bound = 0.5 / dimension as f32;
        let uniform = Uniform::new_inclusive(-bound, bound);
        let input = (0..n).map(|_| uniform.sample(rng)).collect();
        let output = (0..n).map(|_| uniform.sample(rng)).collect();
        Embeddings {
            dimension,
            num_words,
            input,
            output,
        }
    }

    /// Build from existing row-major matrices. Panics if either has the wrong length.
    pub fn from_parts(
        num_words: usize,
        dimension: usize,
        input: Vec<f32>,
        output: Vec<f32>,
    ) -> Self {
        assert_eq!(input.len(), num_words * dimension);
        assert_eq!(output.len(), num_words * dimension);
        Embeddings {
            dimension,
            num_words,
            input,
            output,
        }
    }

    /// Returns the vector size.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the number of words.
    pub fn size(&self) -> usize {
        self.num_words
    }

    pub fn input(&self, word: usize) -> &[f32] {
        &self.input[word * self.dimension..][..self.dimension]
    }

    pub fn input_mut(&mut self, word: usize) -> &mut [f32] {
        &mut self.input[word * self.dimension..][..self.dimension]
    }

    pub fn output(&self, word: usize) -> &[f32] {
        &self.output[word * self.dimension..][..self.dimension]
    }

    pub fn output_mut(&mut self, word: usize) -> &mut [f32] {
        &mut self.output[word * self.dimension..][..self.dimension]
    }

    /// The whole input matrix, row-major.
    pub fn input_matrix(&self) -> &[f32] {
        &self.input
    }

    /// The whole output matrix, row-major.
    pub fn output_matrix(&self) -> &[f32] {
        &self.output
    }
}

/// `embeddings[k]` is the input vector for word `k`.
impl Index<usize> for Embeddings {
    type Output = [f32];

    fn index(&self, i: usize) -> &[f32] {
        self.input(i)
    }
}
