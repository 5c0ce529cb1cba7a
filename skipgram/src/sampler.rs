use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::Vocabulary;

/// Draws negative examples from the smoothed unigram distribution.
#[derive(Debug, Clone)]
pub struct NegativeSampler {
    /// `None` when there is nothing to sample: the vocabulary has fewer than
    /// two words, so every draw would be the excluded one.
    table: Option<WeightedIndex<f64>>,
}

impl NegativeSampler {
    pub fn new(vocab: &Vocabulary) -> Self {
        let table = if vocab.len() < 2 {
            None
        } else {
            WeightedIndex::new(vocab.distribution()).ok()
        };
        NegativeSampler { table }
    }

    /// True if `sample` can produce anything at all.
    pub fn is_available(&self) -> bool {
        self.table.is_some()
    }

    /// Draw `k` word indices, with replacement, none equal to `exclude`.
    ///
    /// Returns an empty vector if no negatives are available.
    pub fn sample<R: Rng + ?Sized>(&self, exclude: usize, k: usize, rng: &mut R) -> Vec<usize> {
        let mut out = Vec::with_capacity(k);
        self.sample_into(exclude, k, rng, &mut out);
        out
    }

    /// Like `sample`, but reuses `out`.
    pub fn sample_into<R: Rng + ?Sized>(
        &self,
        exclude: usize,
        k: usize,
        rng: &mut R,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        let table = match &self.table {
            Some(table) => table,
            None => return,
        };
        // Every word has positive mass and there are at least two words, so
        // this terminates.
        while out.len() < k {
            let target = table.sample(rng);
            if target != exclude {
                out.push(target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_returns_excluded() {
        let vocab = Vocabulary::build(
            &[["a", "a", "a", "a", "b", "c"], ["d", "e", "f", "a", "b", "a"]],
            1,
        );
        let sampler = NegativeSampler::new(&vocab);
        let mut rng = StdRng::seed_from_u64(1);
        for exclude in 0..vocab.len() {
            for _ in 0..200 {
                let negatives = sampler.sample(exclude, 5, &mut rng);
                assert_eq!(negatives.len(), 5);
                assert!(negatives.iter().all(|&n| n != exclude && n < vocab.len()));
            }
        }
    }

    #[test]
    fn follows_distribution() {
        // "a" occurs 16 times, "b" once: p(a) / p(b) = 16^0.75 = 8.
        let mut sentence = vec!["a"; 16];
        sentence.push("b");
        sentence.push("c");
        let vocab = Vocabulary::build(&[sentence], 1);
        let a = vocab.lookup("a").unwrap();
        let b = vocab.lookup("b").unwrap();
        let c = vocab.lookup("c").unwrap();

        let sampler = NegativeSampler::new(&vocab);
        let mut rng = StdRng::seed_from_u64(2);
        let negatives = sampler.sample(c, 20_000, &mut rng);
        let na = negatives.iter().filter(|&&n| n == a).count() as f64;
        let nb = negatives.iter().filter(|&&n| n == b).count() as f64;
        let ratio = na / nb;
        assert!((6.5..9.5).contains(&ratio), "ratio = {ratio}");
    }

    #[test]
    fn two_words() {
        let vocab = Vocabulary::build(&[["x", "y"]], 1);
        let sampler = NegativeSampler::new(&vocab);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sampler.sample(0, 3, &mut rng), vec![1, 1, 1]);
        assert_eq!(sampler.sample(1, 3, &mut rng), vec![0, 0, 0]);
    }

    #[test]
    fn single_word_has_no_negatives() {
        let vocab = Vocabulary::build(&[["only", "only"]], 1);
        let sampler = NegativeSampler::new(&vocab);
        assert!(!sampler.is_available());
        let mut rng = StdRng::seed_from_u64(4);
        assert!(sampler.sample(0, 5, &mut rng).is_empty());
    }

    #[test]
    fn empty_vocabulary() {
        let none: Vec<Vec<&str>> = vec![];
        let sampler = NegativeSampler::new(&Vocabulary::build(&none, 1));
        let mut rng = StdRng::seed_from_u64(5);
        assert!(sampler.sample(0, 5, &mut rng).is_empty());
    }
}
