use rand::Rng;

use crate::{dot, Embeddings, NegativeSampler};

/// Arguments to `exp` are clipped to this range.
const MAX_EXP: f32 = 500.0;

/// The logistic function, 1 / (1 + e^-x).
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x.clamp(-MAX_EXP, MAX_EXP)).exp())
}

/// Performs skip-gram negative-sampling updates, one (center, context) pair
/// at a time.
#[derive(Debug)]
pub struct PairTrainer {
    /// Number of negative examples per pair.
    negative: usize,

    /// Copy of the center word's input vector, taken before the step.
    hidden: Vec<f32>,

    /// Accumulated adjustment for the center word's input vector.
    emb_adjust: Vec<f32>,

    negatives: Vec<usize>,
}

impl PairTrainer {
    pub fn new(dimension: usize, negative: usize) -> Self {
        PairTrainer {
            negative,
            hidden: vec![0.0; dimension],
            emb_adjust: vec![0.0; dimension],
            negatives: Vec::with_capacity(negative),
        }
    }

    /// One gradient step on the pair `(center, context)` with learning rate `alpha`.
    ///
    /// The output vectors of `context` and of each sampled negative are
    /// updated immediately; the input vector of `center` is updated once, at
    /// the end, with the sum of all contributions.
    pub fn train_pair<R: Rng + ?Sized>(
        &mut self,
        embeddings: &mut Embeddings,
        sampler: &NegativeSampler,
        rng: &mut R,
        center: usize,
        context: usize,
        alpha: f32,
    ) {
        self.hidden.copy_from_slice(embeddings.input(center));
        self.emb_adjust.fill(0.0);

        Self::update_output(
            &self.hidden,
            &mut self.emb_adjust,
            embeddings.output_mut(context),
            1.0,
            alpha,
        );

        sampler.sample_into(context, self.negative, rng, &mut self.negatives);
        for &target in &self.negatives {
            Self::update_output(
                &self.hidden,
                &mut self.emb_adjust,
                embeddings.output_mut(target),
                0.0,
                alpha,
            );
        }

        for (e, g) in embeddings.input_mut(center).iter_mut().zip(&self.emb_adjust) {
            *e -= g;
        }
    }

    /// Binary logistic step for one output vector.
    fn update_output(
        hidden: &[f32],
        emb_adjust: &mut [f32],
        weights: &mut [f32],
        label: f32,
        alpha: f32,
    ) {
        let f = dot(hidden, weights);
        // 'g' is the gradient of the loss with respect to `f`, times the learning rate
        let g = (sigmoid(f) - label) * alpha;
        for ((adj, w), &h) in emb_adjust.iter_mut().zip(weights.iter_mut()).zip(hidden) {
            *adj += g * *w;
            *w -= g * h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vocabulary;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn sigmoid_is_clipped() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid(1e9), 1.0);
        assert_eq!(sigmoid(-1e9), 0.0);
        assert!(sigmoid(f32::MAX).is_finite());
        assert!(sigmoid(f32::MIN).is_finite());
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn positive_and_negative_update() {
        // Two words, so the only negative for context 1 is word 0.
        let vocab = Vocabulary::build(&[["p", "q"]], 1);
        let sampler = NegativeSampler::new(&vocab);

        let h = [0.5, -0.25];
        let u0 = [0.1, 0.2];
        let u1 = [-0.3, 0.4];
        let mut emb = Embeddings::from_parts(
            2,
            2,
            vec![0.0, 0.0, h[0], h[1]],
            vec![u0[0], u0[1], u1[0], u1[1]],
        );

        let alpha = 0.1;
        let mut trainer = PairTrainer::new(2, 1);
        let mut rng = StdRng::seed_from_u64(0);
        trainer.train_pair(&mut emb, &sampler, &mut rng, 1, 1, alpha);

        let g_pos = (sigmoid(dot(&h, &u1)) - 1.0) * alpha;
        let g_neg = sigmoid(dot(&h, &u0)) * alpha;
        assert_close(emb.output(1), &[u1[0] - g_pos * h[0], u1[1] - g_pos * h[1]]);
        assert_close(emb.output(0), &[u0[0] - g_neg * h[0], u0[1] - g_neg * h[1]]);
        // The center update uses the output vectors as they were before the step.
        assert_close(
            emb.input(1),
            &[
                h[0] - (g_pos * u1[0] + g_neg * u0[0]),
                h[1] - (g_pos * u1[1] + g_neg * u0[1]),
            ],
        );
        assert_close(emb.input(0), &[0.0, 0.0]);
    }

    #[test]
    fn no_negatives_available() {
        let vocab = Vocabulary::build(&[["solo"]], 1);
        let sampler = NegativeSampler::new(&vocab);
        let mut emb = Embeddings::from_parts(1, 2, vec![1.0, 0.0], vec![0.0, 1.0]);
        let mut trainer = PairTrainer::new(2, 5);
        let mut rng = StdRng::seed_from_u64(0);
        trainer.train_pair(&mut emb, &sampler, &mut rng, 0, 0, 0.5);

        // Only the positive term: f = 0, g = -0.25.
        assert_close(emb.output(0), &[0.25, 1.0]);
        assert_close(emb.input(0), &[1.0, 0.25]);
    }

    #[test]
    fn raises_positive_score() {
        let vocab = Vocabulary::build(&[["a", "b", "c", "d", "e", "f"]], 1);
        let sampler = NegativeSampler::new(&vocab);
        let mut rng = StdRng::seed_from_u64(11);
        let mut emb = Embeddings::new(vocab.len(), 10, &mut rng);
        let mut trainer = PairTrainer::new(10, 2);

        let before = dot(emb.input(0), emb.output(1));
        for _ in 0..50 {
            trainer.train_pair(&mut emb, &sampler, &mut rng, 0, 1, 0.1);
        }
        let after = dot(emb.input(0), emb.output(1));
        assert!(after > before, "{before} -> {after}");
    }
}
