use std::env;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use skipgram::corpus::{split_snippets, write_snippets};

#[derive(Parser)]
#[command(about = "Split text into snippets at blank lines, as JSON lines", long_about = None)]
struct Options {
    /// Input files; read stdin if none are given or for `-`
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn read_lines(files: &[PathBuf]) -> Result<Vec<String>> {
    let mut lines = vec![];
    if files.is_empty() {
        for line in io::stdin().lock().lines() {
            lines.push(line.context("error reading stdin")?);
        }
        return Ok(lines);
    }
    for file_name in files {
        let reader: Box<dyn BufRead> = if file_name.as_os_str() == "-" {
            Box::new(io::stdin().lock())
        } else {
            let f = File::open(file_name)
                .with_context(|| format!("error opening input file {}", file_name.display()))?;
            Box::new(BufReader::new(f))
        };
        for line in reader.lines() {
            lines.push(
                line.with_context(|| format!("error reading input file {}", file_name.display()))?,
            );
        }
    }
    Ok(lines)
}

/// `DEBUG` switches to the numbered dump when set to anything but the empty string.
fn debug_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn run(options: Options) -> Result<()> {
    let lines = read_lines(&options.files)?;
    let snippets = split_snippets(&lines);

    let mut out = BufWriter::new(io::stdout().lock());
    write_snippets(&mut out, &snippets, debug_requested(env::var_os("DEBUG").as_deref()))
        .context("error writing output")?;
    out.flush().context("error writing output")?;
    Ok(())
}

fn main() {
    let options = Options::parse();

    if let Err(err) = run(options) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_variable() {
        assert!(!debug_requested(None));
        assert!(!debug_requested(Some(OsStr::new(""))));
        assert!(debug_requested(Some(OsStr::new("1"))));
        assert!(debug_requested(Some(OsStr::new("0"))));
    }
}
