use std::cmp::Reverse;
use std::collections::HashMap;

use crate::{Error, Result};

/// Exponent applied to word counts to get the negative sampling distribution.
const POWER: f64 = 0.75;

/// Words that occur at least `min_count` times in the training data, with
/// their counts and the smoothed unigram distribution used for negative
/// sampling.
///
/// Indices are assigned by descending count; ties go to the word that
/// appeared first in the corpus. Building twice from the same corpus yields
/// the same indices.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// `words[i]` is the word with index `i`.
    words: Vec<String>,

    /// `counts[i]` is the number of times `words[i]` occurs in the corpus.
    counts: Vec<u64>,

    index: HashMap<String, usize>,

    /// `distribution[i]` is proportional to `counts[i]^0.75`; sums to 1.
    distribution: Vec<f64>,

    /// Number of tokens seen while counting, including discarded words.
    total_words: u64,
}

impl Vocabulary {
    pub fn build<S, T>(sentences: &[S], min_count: u64) -> Self
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        // word -> (count, first position)
        let mut seen: HashMap<&str, (u64, u64)> = HashMap::new();
        let mut total_words = 0;
        for sentence in sentences {
            for word in sentence.as_ref() {
                let entry = seen.entry(word.as_ref()).or_insert((0, total_words));
                entry.0 += 1;
                total_words += 1;
            }
        }

        let mut kept: Vec<(&str, u64, u64)> = seen
            .into_iter()
            .filter(|&(_, (cn, _))| cn >= min_count)
            .map(|(word, (cn, first))| (word, cn, first))
            .collect();
        kept.sort_by_key(|&(_, cn, first)| (Reverse(cn), first));

        let words: Vec<String> = kept.iter().map(|&(w, _, _)| w.to_string()).collect();
        let counts: Vec<u64> = kept.iter().map(|&(_, cn, _)| cn).collect();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();

        let weights: Vec<f64> = counts.iter().map(|&cn| (cn as f64).powf(POWER)).collect();
        let sum: f64 = weights.iter().sum();
        let distribution = if sum > 0.0 {
            weights.into_iter().map(|w| w / sum).collect()
        } else {
            vec![]
        };

        Vocabulary {
            words,
            counts,
            index,
            distribution,
            total_words,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get the index for a word. Exact match only, case-sensitive.
    pub fn lookup(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Get the word for a word-index. Panics if `index` is out of range.
    pub fn word(&self, index: usize) -> &str {
        &self.words[index]
    }

    pub fn count(&self, index: usize) -> u64 {
        self.counts[index]
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    pub fn distribution(&self) -> &[f64] {
        &self.distribution
    }

    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    /// Map a sentence to word indices, dropping words not in the vocabulary.
    pub fn indices<T: AsRef<str>>(&self, sentence: &[T]) -> Vec<usize> {
        sentence
            .iter()
            .filter_map(|word| self.lookup(word.as_ref()))
            .collect()
    }

    /// Check that `negative` negatives can always be drawn without hitting
    /// the context word: there must be more than `negative` words.
    pub fn ensure_sampleable(&self, negative: usize) -> Result<()> {
        if self.is_empty() || self.len() < negative + 1 {
            return Err(Error::DegenerateVocabulary {
                words: self.len(),
                negative,
            });
        }
        Ok(())
    }
}
