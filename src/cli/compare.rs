use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::lexicon::Lexicon;
use crate::core::types::{Other, Pila, Side};
use crate::matching::engine::{OverlapConfig, OverlapEngine, OverlapOutcome, ResolvedMatch};
use crate::matching::enrichment::{Decliner, NoDecliner};
use crate::matching::metrics::display_name;
use crate::parsing;

#[derive(Args)]
pub struct CompareArgs {
    /// PILA lexicon (TSV or CSV, optionally gzipped)
    #[arg(required = true)]
    pub pila: PathBuf,

    /// Lexicon to compare against (TSV or CSV, optionally gzipped)
    #[arg(required = true)]
    pub other: PathBuf,

    /// Name of the comparison dataset (defaults to the file name)
    #[arg(short, long)]
    pub dataset: Option<String>,

    /// Declension table (headword, form, tag) used to enrich PILA items
    #[arg(long)]
    pub decliner: Option<PathBuf>,

    /// Do not add declined forms, even if a table is given
    #[arg(long)]
    pub no_decline: bool,

    /// List the matched id pairs
    #[arg(long)]
    pub show_matches: bool,
}

/// Execute compare subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be parsed or the overlap computation fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let pila: Lexicon<Pila> = parsing::tsv::parse_lexicon_file(&args.pila)?;
    let other: Lexicon<Other> = parsing::tsv::parse_lexicon_file(&args.other)?;

    if verbose {
        eprintln!("PILA: {} items from {}", pila.len(), source_of(&pila));
        eprintln!("Other: {} items from {}", other.len(), source_of(&other));
    }

    let table;
    let decliner: &dyn Decliner = match &args.decliner {
        Some(path) if !args.no_decline => {
            table = parsing::decliner_table::parse_table_file(path)?;
            if verbose {
                eprintln!("Loaded declension table with {} headwords", table.headword_count());
            }
            &table
        }
        _ => &NoDecliner,
    };

    let config = OverlapConfig {
        decline_pila: args.decliner.is_some() && !args.no_decline,
        ..OverlapConfig::default()
    };
    let engine = OverlapEngine::with_config(decliner, config);
    let (outcome, resolved) = engine.compare(&pila, &other)?;

    if verbose {
        eprintln!(
            "Enrichment: {} PILA items declined, {} skipped, {} variants added",
            outcome.pila_enrichment.declined,
            outcome.pila_enrichment.skipped,
            outcome.pila_enrichment.variants_added + outcome.other_enrichment.variants_added,
        );
    }

    let dataset = args
        .dataset
        .clone()
        .unwrap_or_else(|| dataset_name(&args.other));
    let matches = args.show_matches.then_some(resolved.as_slice());

    match format {
        OutputFormat::Text => print_text_results(&dataset, &outcome, matches),
        OutputFormat::Json => print_json_results(&dataset, &outcome, matches)?,
        OutputFormat::Tsv => print_tsv_results(&outcome, matches),
    }

    Ok(())
}

fn source_of<S: Side>(lexicon: &Lexicon<S>) -> &str {
    lexicon.source.as_deref().unwrap_or("<memory>")
}

/// File name without any `.gz` and format extension
fn dataset_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    name.rsplit_once('.')
        .map_or(name, |(stem, _)| stem)
        .to_string()
}

/// Header line of the text report
#[must_use]
pub fn create_header(dataset: &str) -> String {
    format!("Compatibility Results for PILA and {dataset}:")
}

fn print_text_results(dataset: &str, outcome: &OverlapOutcome, matches: Option<&[ResolvedMatch]>) {
    println!("{}", create_header(dataset));
    for (name, value) in outcome.result.entries() {
        println!("\t* {}: {value}", display_name(name));
    }

    if let Some(matches) = matches {
        println!("\nMatches:");
        for m in matches {
            println!("\t{}\t{} <-> {}", m.kind, m.pila_id, m.other_id);
        }
    }
    println!();
}

fn print_json_results(
    dataset: &str,
    outcome: &OverlapOutcome,
    matches: Option<&[ResolvedMatch]>,
) -> anyhow::Result<()> {
    let mut output = serde_json::json!({
        "dataset": dataset,
        "results": outcome.result,
        "enrichment": {
            "pila_items": outcome.pila_enrichment.items,
            "pila_declined": outcome.pila_enrichment.declined,
            "pila_skipped": outcome.pila_enrichment.skipped,
            "pila_variants_added": outcome.pila_enrichment.variants_added,
            "other_items": outcome.other_enrichment.items,
            "other_variants_added": outcome.other_enrichment.variants_added,
        },
    });

    if let Some(matches) = matches {
        output["matches"] = serde_json::to_value(matches)?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(outcome: &OverlapOutcome, matches: Option<&[ResolvedMatch]>) {
    let entries = outcome.result.entries();
    let names: Vec<&str> = entries.iter().map(|(name, _)| *name).collect();
    let values: Vec<String> = entries.iter().map(|(_, value)| value.to_string()).collect();
    println!("{}", names.join("\t"));
    println!("{}", values.join("\t"));

    if let Some(matches) = matches {
        println!();
        println!("overlap_type\tpila_id\tother_id");
        for m in matches {
            println!("{}\t{}\t{}", m.kind, m.pila_id, m.other_id);
        }
    }
}
