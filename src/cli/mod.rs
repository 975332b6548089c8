//! Command-line interface for lexicon-overlap.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **compare**: Measure the overlap between the PILA lexicon and another lexicon
//! - **decline**: Show the corrected declension-table output for one headword
//!
//! ## Usage
//!
//! ```text
//! # Direct and macron-insensitive overlap only
//! lexicon-overlap compare pila.tsv ielex.tsv --dataset ielex
//!
//! # With declined PILA forms, listing matched ids
//! lexicon-overlap compare pila.tsv jambu.csv --decliner declensions.tsv --show-matches
//!
//! # JSON output for scripting
//! lexicon-overlap compare pila.tsv cognet.tsv --format json
//!
//! # Inspect what enrichment will add for one headword
//! lexicon-overlap decline rosa --decliner declensions.tsv
//! ```

use clap::{Parser, Subcommand};

pub mod compare;
pub mod decline;

#[derive(Parser)]
#[command(name = "lexicon-overlap")]
#[command(version)]
#[command(about = "Measure lexical overlap between PILA and another word-form dataset")]
#[command(
    long_about = "lexicon-overlap estimates how many PILA items are already present, in some form, in another dataset.\n\nItems are first paired by exact spelling. The unpaired items are then enriched with macron-free spellings and declined forms, and paired again to recover indirect overlaps. Every pairing is one-to-one and maximal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Measure overlap between two lexicons
    Compare(compare::CompareArgs),

    /// Preview declined forms for a headword
    Decline(decline::DeclineArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
