use std::cmp::Reverse;

use indicatif::{ProgressBar, ProgressStyle};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    cosine_similarity, Embeddings, Error, NegativeSampler, PairTrainer, Result, Vocabulary,
};

/// Hyperparameters for a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingOptions {
    /// Length of each word vector.
    pub embedding_dim: usize,
    /// Max distance, in kept words, between a center word and its context words.
    pub window_size: usize,
    /// Discard words that appear less than this many times.
    pub min_count: u64,
    /// Number of negative examples per (center, context) pair.
    pub negative_samples: usize,
    /// Starting learning rate.
    pub learning_rate: f32,
    pub epochs: usize,
    /// Seed for initialization and negative sampling. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Decay the learning rate linearly to near zero over the whole run.
    pub decay: bool,
    /// 0 is silent, 1 prints a summary per epoch, 2 also shows a progress bar.
    pub debug_mode: usize,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        TrainingOptions {
            embedding_dim: 100,
            window_size: 5,
            min_count: 5,
            negative_samples: 5,
            learning_rate: 0.025,
            epochs: 5,
            seed: None,
            decay: false,
            debug_mode: 0,
        }
    }
}

impl TrainingOptions {
    /// A random number generator seeded according to `self.seed`.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// All (center, context) pairs of positions in `sentence` at most `window`
/// apart, in the order training visits them.
pub fn context_pairs(
    sentence: &[usize],
    window: usize,
) -> impl Iterator<Item = (usize, usize)> + '_ {
    sentence.iter().enumerate().flat_map(move |(i, &center)| {
        let start = i.saturating_sub(window);
        let stop = i.saturating_add(window).saturating_add(1).min(sentence.len());
        (start..stop)
            .filter(move |&j| j != i)
            .map(move |j| (center, sentence[j]))
    })
}

/// Linear decay: `starting_alpha * (1 - done / total)`, floored at
/// `starting_alpha * 0.0001`.
fn decayed_learning_rate(starting_alpha: f32, done: u64, total: u64) -> f32 {
    if total == 0 {
        return starting_alpha;
    }
    starting_alpha * (1.0 - done as f32 / total as f32).max(0.0001)
}

/// A skip-gram model: vocabulary plus embeddings.
#[derive(Debug, Clone)]
pub struct Word2Vec {
    options: TrainingOptions,
    vocab: Vocabulary,
    embeddings: Embeddings,
    sampler: NegativeSampler,
    /// Number of pairs trained in each completed epoch.
    epoch_pairs: Vec<u64>,
}

impl Word2Vec {
    /// Build the vocabulary from `sentences` and train for `options.epochs` epochs.
    ///
    /// Never fails: with an empty vocabulary training does nothing, and with
    /// a single word no negatives are drawn.
    pub fn train<S, T>(sentences: &[S], options: TrainingOptions) -> Self
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut rng = options.rng();
        Self::train_using(sentences, options, &mut rng)
    }

    /// Like `train`, with an explicit source of randomness.
    pub fn train_using<S, T, R>(sentences: &[S], options: TrainingOptions, rng: &mut R) -> Self
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
        R: Rng + ?Sized,
    {
        let vocab = Vocabulary::build(sentences, options.min_count);
        let mut model = Self::with_vocabulary(vocab, options, rng);
        model.train_epochs(sentences, rng);
        model
    }

    /// An untrained model with freshly initialized embeddings.
    pub fn with_vocabulary<R: Rng + ?Sized>(
        vocab: Vocabulary,
        options: TrainingOptions,
        rng: &mut R,
    ) -> Self {
        if options.debug_mode > 0 {
            println!("Vocabulary size: {}", vocab.len());
            println!("Words in training data: {}", vocab.total_words());
        }
        let embeddings = Embeddings::new(vocab.len(), options.embedding_dim, rng);
        let sampler = NegativeSampler::new(&vocab);
        Word2Vec {
            options,
            vocab,
            embeddings,
            sampler,
            epoch_pairs: vec![],
        }
    }

    /// Run `options.epochs` passes over `sentences`. Returns the total number
    /// of pairs trained.
    pub fn train_epochs<S, T, R>(&mut self, sentences: &[S], rng: &mut R) -> u64
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
        R: Rng + ?Sized,
    {
        let window = self.options.window_size;
        let epochs = self.options.epochs;
        let starting_alpha = self.options.learning_rate;

        let corpus: Vec<Vec<usize>> = sentences
            .iter()
            .map(|sentence| self.vocab.indices(sentence.as_ref()))
            .filter(|sentence| sentence.len() > 1)
            .collect();
        let pairs_per_epoch: u64 = corpus
            .iter()
            .map(|sentence| context_pairs(sentence, window).count() as u64)
            .sum();
        let total_pairs = pairs_per_epoch * epochs as u64;

        let progress = self.progress_bar(total_pairs);
        let mut trainer =
            PairTrainer::new(self.embeddings.dimension(), self.options.negative_samples);
        let mut pair_count_actual: u64 = 0;

        for epoch in 0..epochs {
            let mut pair_count: u64 = 0;
            for sentence in &corpus {
                for (center, context) in context_pairs(sentence, window) {
                    let alpha = if self.options.decay {
                        decayed_learning_rate(starting_alpha, pair_count_actual, total_pairs)
                    } else {
                        starting_alpha
                    };
                    trainer.train_pair(
                        &mut self.embeddings,
                        &self.sampler,
                        rng,
                        center,
                        context,
                        alpha,
                    );
                    pair_count += 1;
                    pair_count_actual += 1;
                }
                progress.set_position(pair_count_actual);
            }

            self.epoch_pairs.push(pair_count);
            if self.options.debug_mode > 0 {
                progress.suspend(|| {
                    println!("Epoch {}/{epochs} - Trained on {pair_count} pairs", epoch + 1)
                });
            }
        }
        progress.finish_and_clear();
        pair_count_actual
    }

    fn progress_bar(&self, total_pairs: u64) -> ProgressBar {
        if self.options.debug_mode < 2 {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40} {pos}/{len} pairs ({per_sec}, eta {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        ProgressBar::new(total_pairs).with_style(style)
    }

    pub fn options(&self) -> &TrainingOptions {
        &self.options
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn embeddings(&self) -> &Embeddings {
        &self.embeddings
    }

    /// Number of pairs trained in each epoch so far.
    pub fn epoch_pairs(&self) -> &[u64] {
        &self.epoch_pairs
    }

    fn lookup(&self, word: &str) -> Result<usize> {
        self.vocab
            .lookup(word)
            .ok_or_else(|| Error::NotFound(word.to_string()))
    }

    /// The embedding of `word`.
    pub fn get_vector(&self, word: &str) -> Result<&[f32]> {
        Ok(self.embeddings.input(self.lookup(word)?))
    }

    /// Cosine similarity between the embeddings of two words.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        Ok(cosine_similarity(self.get_vector(a)?, self.get_vector(b)?))
    }

    /// The `top_n` words closest to `word` by cosine similarity, best first.
    /// `word` itself is never included.
    pub fn most_similar(&self, word: &str, top_n: usize) -> Result<Vec<(&str, f32)>> {
        let query = self.lookup(word)?;
        let vec = self.embeddings.input(query);

        let mut best: Vec<(usize, f32)> = (0..self.vocab.len())
            .filter(|&c| c != query)
            .map(|c| (c, cosine_similarity(vec, self.embeddings.input(c))))
            .collect();
        best.sort_by_key(|&(_, dist)| Reverse(OrderedFloat(dist)));
        Ok(best
            .into_iter()
            .take(top_n)
            .map(|(c, dist)| (self.vocab.word(c), dist))
            .collect())
    }
}
