use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use skipgram::corpus::{read_sentences, read_snippet_sentences};
use skipgram::{Error, TrainingOptions, Vocabulary, Word2Vec};

#[derive(Parser)]
#[command(about = "Skip-gram word vectors with negative sampling", long_about = None, version)]
struct Options {
    /// Use text data from FILE to train the model, one sentence per line
    #[arg(long = "train", value_name = "FILE")]
    train_file: PathBuf,

    /// The training file holds JSON lines from the `snippets` tool
    #[arg(long)]
    snippets: bool,

    /// Set size of word vectors
    #[arg(long = "size", default_value_t = 100)]
    embedding_dim: usize,

    /// Set max skip length between words
    #[arg(long, default_value_t = 5)]
    window: usize,

    /// Discard words that appear less than N times
    #[arg(long = "min-count", value_name = "N", default_value_t = 5)]
    min_count: u64,

    /// Number of negative examples per context word
    #[arg(long, default_value_t = 5)]
    negative: usize,

    /// Set the learning rate
    #[arg(long, default_value_t = 0.025)]
    alpha: f32,

    /// Number of training epochs
    #[arg(long, default_value_t = 5)]
    iter: usize,

    /// Seed the random number generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Decay the learning rate linearly over the run
    #[arg(long)]
    decay: bool,

    /// Set the debug mode (default = 2 = more info during training)
    #[arg(long = "debug", default_value_t = 2)]
    debug_mode: usize,

    /// Print the words closest to WORD after training (may be repeated);
    /// without this, read words from stdin
    #[arg(long = "query", value_name = "WORD")]
    queries: Vec<String>,

    /// Number of closest words to show
    #[arg(long = "top", value_name = "N", default_value_t = 10)]
    top_n: usize,
}

impl Options {
    fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            embedding_dim: self.embedding_dim,
            window_size: self.window,
            min_count: self.min_count,
            negative_samples: self.negative,
            learning_rate: self.alpha,
            epochs: self.iter,
            seed: self.seed,
            decay: self.decay,
            debug_mode: self.debug_mode,
        }
    }
}

fn print_similar(model: &Word2Vec, word: &str, top_n: usize) -> Result<()> {
    let best = match model.most_similar(word, top_n) {
        Ok(best) => best,
        Err(Error::NotFound(_)) => {
            println!("Out of dictionary word: {word}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    println!();
    println!("                                              Word       Cosine distance");
    println!("------------------------------------------------------------------------");
    for (word, dist) in best {
        println!("{:50}\t\t{}", word, dist);
    }
    Ok(())
}

fn run(options: Options) -> Result<()> {
    let f = BufReader::new(
        File::open(&options.train_file).context("error opening training data file")?,
    );
    let sentences = if options.snippets {
        read_snippet_sentences(f)
    } else {
        read_sentences(f)
    }
    .context("error reading training data file")?;

    let training_options = options.training_options();
    if options.debug_mode > 0 {
        println!("Starting training using file {}", options.train_file.display());
    }
    let vocab = Vocabulary::build(&sentences, training_options.min_count);
    vocab
        .ensure_sampleable(training_options.negative_samples)
        .context("not enough distinct words in training data; try a lower --min-count")?;

    let mut rng = training_options.rng();
    let mut model = Word2Vec::with_vocabulary(vocab, training_options, &mut rng);
    model.train_epochs(&sentences, &mut rng);

    if !options.queries.is_empty() {
        for word in &options.queries {
            print_similar(&model, word, options.top_n)?;
        }
        return Ok(());
    }

    loop {
        print!("Enter word (EXIT to break): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).context("error reading stdin")? == 0 {
            break;
        }
        let word = line.trim();
        if word == "EXIT" {
            break;
        }
        if !word.is_empty() {
            print_similar(&model, word, options.top_n)?;
        }
    }
    Ok(())
}

fn main() {
    let options = Options::parse();

    if let Err(err) = run(options) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}
