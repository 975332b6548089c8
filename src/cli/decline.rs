use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::matching::enrichment::{
    correct_declined_forms, strip_macrons, DeclineError, DeclinedForm, Decliner,
};
use crate::parsing;

#[derive(Args)]
pub struct DeclineArgs {
    /// Headword to decline (macrons are stripped first, as during enrichment)
    #[arg(required = true)]
    pub headword: String,

    /// Declension table (headword, form, tag)
    #[arg(long, required = true)]
    pub decliner: PathBuf,
}

/// Execute decline subcommand
///
/// # Errors
///
/// Returns an error if the table cannot be parsed or the decliner fails with
/// anything other than an unknown headword.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DeclineArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = parsing::decliner_table::parse_table_file(&args.decliner)?;
    if verbose {
        eprintln!("Loaded declension table with {} headwords", table.headword_count());
    }

    let headword = strip_macrons(args.headword.trim());
    let forms = match table.decline(&headword) {
        Ok(forms) => correct_declined_forms(&headword, forms),
        Err(DeclineError::Generation(e)) => {
            warn!(headword = %headword, "{e}; enrichment would add only the macron-free spelling");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Text => print_text_forms(&headword, &forms),
        OutputFormat::Json => print_json_forms(&headword, &forms)?,
        OutputFormat::Tsv => print_tsv_forms(&forms),
    }

    Ok(())
}

fn print_text_forms(headword: &str, forms: &[DeclinedForm]) {
    println!("Declined forms for {headword}:");
    for declined in forms.iter().filter(|d| !d.form.is_empty()) {
        println!("\t* {}\t{}", declined.form, declined.tag);
    }
}

fn print_json_forms(headword: &str, forms: &[DeclinedForm]) -> anyhow::Result<()> {
    let forms: Vec<serde_json::Value> = forms
        .iter()
        .filter(|d| !d.form.is_empty())
        .map(|d| serde_json::json!({ "form": d.form, "tag": d.tag }))
        .collect();
    let output = serde_json::json!({
        "headword": headword,
        "forms": forms,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_forms(forms: &[DeclinedForm]) {
    println!("form\ttag");
    for declined in forms.iter().filter(|d| !d.form.is_empty()) {
        println!("{}\t{}", declined.form, declined.tag);
    }
}
