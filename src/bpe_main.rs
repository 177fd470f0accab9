// src/bpe_main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::LevelFilter;

use subword_prep::tokenizer::{encode_word, escape, MergeList};

/// Splits a word into BPE subwords using a merges file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the file with merges
    #[arg(value_name = "MERGES_FILE")]
    merges_file: PathBuf,

    /// Word to encode
    #[arg(default_value = "if")]
    word: String,

    /// Read merges as JSON ({"merges": [[left, right], ...]}) instead of text
    #[arg(long)]
    json: bool,

    /// Only use the first N merges
    #[arg(short = 'n', long, value_name = "N")]
    max_merges: Option<usize>,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

fn init_logging(verbose: u8, quiet: u8) {
    let level = match (quiet, verbose) {
        (q, _) if q >= 2 => LevelFilter::Error,
        (1, _) => LevelFilter::Warn,
        (_, 0) => LevelFilter::Info,
        (_, 1) => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    builder.filter_level(level);
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let merges = if cli.json {
        MergeList::from_json_file(&cli.merges_file, cli.max_merges)
    } else {
        MergeList::from_txt_file(&cli.merges_file, cli.max_merges)
    }
    .with_context(|| format!("unable to read merges from {}", cli.merges_file.display()))?;
    log::info!("Using {} merges", merges.len());

    let subwords = encode_word(&escape(&cli.word, true), &merges)
        .with_context(|| format!("unable to encode {:?}", cli.word))?;
    println!("{}", serde_json::to_string(&subwords)?);
    Ok(())
}
