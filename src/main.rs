use clap::Parser;
use std::path::PathBuf;

use paper_grader::extract::{DocumentFormat, ExtractError};
use paper_grader::prompt::{prompt, value_or_prompt};
use paper_grader::scoring::Rubric;
use paper_grader::EvaluationRequest;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DOCUMENT: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_OUTPUT: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "paper-grader")]
#[command(about = "Score a MUN position paper against the rubric", long_about = None)]
#[command(version)]
struct Cli {
    /// Paper to evaluate (.pdf, .docx or plain text); prompted for if omitted
    file: Option<PathBuf>,

    /// Delegate name
    #[arg(short, long)]
    delegate: Option<String>,

    /// Country the delegate represents
    #[arg(long)]
    country: Option<String>,

    /// Committee name
    #[arg(long)]
    committee: Option<String>,

    /// Read the file as this format instead of detecting it (pdf, docx, text)
    #[arg(short, long)]
    format: Option<DocumentFormat>,

    /// Print the evaluation as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging and show the score breakdown
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/paper-grader/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = paper_grader::logging::init_tracing(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Load and validate config
    let config = match paper_grader::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let rubric_config = config.rubric();
    let grammar_config = config.grammar();
    if let Err(errors) = paper_grader::scoring::validate_rubric(&rubric_config, &grammar_config) {
        eprintln!("Rubric config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let rubric = match Rubric::from_config(&rubric_config, &grammar_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let request = match read_request(cli.file, cli.delegate, cli.country, cli.committee) {
        Ok(r) => r.with_format(cli.format),
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let evaluation = match paper_grader::evaluate_paper(&request, &rubric) {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(evaluation_exit_code(&e));
        }
    };

    if cli.json {
        match paper_grader::output::format_json(&evaluation) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to render JSON: {}", e);
                std::process::exit(EXIT_OUTPUT);
            }
        }
    } else {
        let use_colors = paper_grader::output::should_use_colors();
        paper_grader::print_report(&evaluation, use_colors);
        if cli.verbose {
            eprintln!();
            eprintln!("Score breakdown ({} characters, {}):", evaluation.characters, evaluation.format);
            eprintln!("{}", paper_grader::output::format_breakdown(&evaluation.result));
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Prompt for anything not given on the command line, in a fixed order
fn read_request(
    file: Option<PathBuf>,
    delegate: Option<String>,
    country: Option<String>,
    committee: Option<String>,
) -> anyhow::Result<EvaluationRequest> {
    let path = match file {
        Some(p) => p,
        None => PathBuf::from(prompt("Enter file path: ")?),
    };
    let delegate = value_or_prompt(delegate, "Delegate Name: ")?;
    let country = value_or_prompt(country, "Country: ")?;
    let committee = value_or_prompt(committee, "Committee: ")?;
    Ok(EvaluationRequest::new(path, delegate, country, committee))
}

/// A document that could not be read is distinguished from bad input.
fn evaluation_exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ExtractError>().is_some() {
        EXIT_DOCUMENT
    } else {
        EXIT_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_extract_error_maps_to_document_code() {
        let err = Err::<(), _>(ExtractError::Pdf("bad xref".to_string()))
            .context("Failed to extract text from paper.pdf")
            .unwrap_err();
        assert_eq!(evaluation_exit_code(&err), EXIT_DOCUMENT);
    }

    #[test]
    fn test_other_errors_map_to_config_code() {
        let err = anyhow::anyhow!("Unexpected end of input while reading 'Country:'");
        assert_eq!(evaluation_exit_code(&err), EXIT_CONFIG);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_DOCUMENT, EXIT_CONFIG, EXIT_OUTPUT];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_cli_parses_format_and_json() {
        let cli = Cli::try_parse_from(["paper-grader", "paper.txt", "--format", "pdf", "--json"]).unwrap();
        assert_eq!(cli.format, Some(DocumentFormat::Pdf));
        assert!(cli.json);
        assert_eq!(cli.file, Some(PathBuf::from("paper.txt")));
    }
}
