//! Reading training text.
//!
//! Two input formats are supported: plain text with one sentence per line,
//! and the JSON lines produced by the `snippets` tool, where each record's
//! `text` becomes one sentence. Tokens are separated by whitespace.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::Result;

/// A chunk of text, as emitted by the `snippets` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: usize,
    pub text: String,
    /// Length of `text` in characters.
    pub len: usize,
}

impl Snippet {
    pub fn new(id: usize, text: String) -> Self {
        let len = text.chars().count();
        Snippet { id, text, len }
    }
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Read one sentence per line. Blank lines are skipped.
pub fn read_sentences<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut sentences = vec![];
    for line in reader.lines() {
        let sentence = tokenize(&line?);
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
    }
    Ok(sentences)
}

/// Read JSON-lines snippets and tokenize each one's text as a sentence.
pub fn read_snippet_sentences<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut sentences = vec![];
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let snippet: Snippet = serde_json::from_str(&line)?;
        let sentence = tokenize(&snippet.text);
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
    }
    Ok(sentences)
}

/// Group lines into snippets. Consecutive non-blank lines, trimmed and joined
/// with single spaces, form one snippet; blank lines separate snippets.
pub fn split_snippets<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut snippets = vec![];
    let mut batch: Vec<String> = vec![];
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            if !batch.is_empty() {
                snippets.push(batch.join(" "));
                batch.clear();
            }
        } else {
            batch.push(line.to_string());
        }
    }
    if !batch.is_empty() {
        snippets.push(batch.join(" "));
    }
    snippets
}

/// Print `snippets` as JSON lines, one `Snippet` per line. With `debug`,
/// print the number of snippets and then each one under a ` ==== i ====`
/// header instead.
pub fn write_snippets<W: Write>(out: &mut W, snippets: &[String], debug: bool) -> Result<()> {
    if debug {
        writeln!(out, "{}", snippets.len())?;
        for (i, s) in snippets.iter().enumerate() {
            writeln!(out)?;
            writeln!(out, " ==== {i} ====")?;
            writeln!(out, "{s}")?;
        }
    } else {
        for (i, s) in snippets.iter().enumerate() {
            let json = serde_json::to_string(&Snippet::new(i, s.clone()))?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}
