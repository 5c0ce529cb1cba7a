use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The word is not in the vocabulary.
    #[error("word {0:?} not in vocabulary")]
    NotFound(String),

    /// Too few distinct words to draw negatives that differ from the context word.
    #[error(
        "vocabulary has {words} words, need at least {} for {negative} negative samples",
        .negative + 1
    )]
    DegenerateVocabulary { words: usize, negative: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
