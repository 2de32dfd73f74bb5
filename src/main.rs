//! `esg-rater`: count ESG keywords in business descriptions and rate them.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install logging ([`logging`]).
//! 2. Load config and build the keyword index ([`config::load_config`]).
//! 3. Dispatch the subcommand:
//!    - `score` ingests files ([`ingest`]), scores them ([`esg`]) and renders
//!      a report ([`report`]); exits `1` when `--fail-below` is violated.
//!    - `dataset` / `label` write feature CSVs ([`dataset`]).
//!    - `validate` runs the prediction validator ([`validate`]).
//!    - `explain`, `ideas`, `ask`, `improve`, `plan`, `status` talk to a local
//!      Ollama server ([`llm`]).

mod cli;
mod config;
mod dataset;
mod error;
mod esg;
mod ingest;
mod llm;
mod logging;
mod models;
mod report;
mod validate;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::{Cli, Command, ReportFormat, ScoreArgs, TextInput};
use config::load_config;
use esg::classifier::score_and_classify;
use esg::keywords::KeywordIndex;
use llm::ollama::{recommend_model, OllamaClient};
use llm::prompts::{self, ESG_CONTEXT};
use models::{Document, ScoredDocument};

const OLLAMA_HINT: &str = "is Ollama running? Start it with 'ollama serve'";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let config = load_config(cli.config.as_deref())?;
    let index = config.keyword_index()?;

    match cli.command {
        Command::Score(args) => {
            let client = if args.explain {
                Some(OllamaClient::new(config.llm.clone())?)
            } else {
                None
            };
            run_score(&index, args, client.as_ref(), cli.verbose, cli.quiet).await?;
        }
        Command::Dataset {
            paths,
            output,
            label,
            csv_column,
        } => {
            let documents = ingest::ingest_paths(&paths, &csv_column)?;
            let rows = dataset::write_features(&index, &documents, &output, label)?;
            if !cli.quiet {
                eprintln!(
                    "  {} wrote {} rows to {}",
                    "→".cyan(),
                    rows,
                    output.display()
                );
            }
        }
        Command::Label { input, output } => {
            let output = output.unwrap_or_else(|| input.clone());
            let labeled = dataset::label_features(&input, &output)?;
            if !cli.quiet {
                for (name, total, rating) in &labeled {
                    println!("  {:<32} {:>6}  {}", name, total, rating);
                }
                eprintln!(
                    "  {} labeled {} rows in {}",
                    "→".cyan(),
                    labeled.len(),
                    output.display()
                );
            }
        }
        Command::Validate { mock, seed, export } => {
            run_validate(&index, mock, seed, export, cli.verbose, cli.quiet)?;
        }
        Command::Explain(input) => {
            let idea = read_text_input(&input)?;
            let assessment = score_and_classify(&index, &idea);
            let client = OllamaClient::new(config.llm.clone())?;
            let prompt = prompts::explain_prompt(&idea, &assessment.scores, assessment.rating);
            let text = client.generate(ESG_CONTEXT, &prompt).await.context(OLLAMA_HINT)?;
            report::terminal::render_explanation(&assessment, client.model(), &text);
        }
        Command::Ideas {
            industry,
            focus,
            count,
        } => {
            let client = OllamaClient::new(config.llm.clone())?;
            let prompt = prompts::ideas_prompt(industry.as_deref(), focus.as_deref(), count);
            let text = client.generate(ESG_CONTEXT, &prompt).await.context(OLLAMA_HINT)?;
            let scored: Vec<_> = prompts::parse_ideas(&text)?
                .into_iter()
                .map(|idea| {
                    let assessment = score_and_classify(&index, idea.scoring_text());
                    (idea, assessment)
                })
                .collect();
            tracing::info!(ideas = scored.len(), "parsed ideas from reply");
            if cli.verbose || scored.is_empty() {
                report::terminal::render_llm_text(client.model(), &text);
            }
            report::terminal::render_ideas(&scored, cli.verbose);
        }
        Command::Ask { question } => {
            let client = OllamaClient::new(config.llm.clone())?;
            let prompt = prompts::question_prompt(&question);
            let text = client.generate(ESG_CONTEXT, &prompt).await.context(OLLAMA_HINT)?;
            report::terminal::render_llm_text(client.model(), &text);
        }
        Command::Improve(input) => {
            let idea = read_text_input(&input)?;
            let assessment = score_and_classify(&index, &idea);
            let weak = prompts::weak_areas(&assessment.scores);
            let client = OllamaClient::new(config.llm.clone())?;
            let prompt = prompts::improve_prompt(&idea, &weak);
            let text = client.generate(ESG_CONTEXT, &prompt).await.context(OLLAMA_HINT)?;
            report::terminal::render_explanation(&assessment, client.model(), &text);
        }
        Command::Plan(input) => {
            let idea = read_text_input(&input)?;
            let client = OllamaClient::new(config.llm.clone())?;
            let prompt = prompts::plan_prompt(&idea);
            let text = client.generate(ESG_CONTEXT, &prompt).await.context(OLLAMA_HINT)?;
            report::terminal::render_llm_text(client.model(), &text);
        }
        Command::Status => {
            let client = OllamaClient::new(config.llm.clone())?;
            let models = client.list_models().await.context(OLLAMA_HINT)?;
            println!("\n {} {}", "Ollama:".bold(), config.llm.url);
            println!(" {} {}", "Configured model:".bold(), client.model());
            if models.is_empty() {
                println!(" {} No models installed. Try 'ollama pull {}'", "⚠".yellow(), client.model());
                return Ok(());
            }
            println!(" {}", "Installed models:".bold());
            for name in &models {
                println!("   - {}", name);
            }
            match recommend_model(&models, &config.llm.preferred_models) {
                Some(name) => println!(" {} {}\n", "Recommended:".bold(), name.green()),
                None => println!(" {} none of the preferred models is installed\n", "⚠".yellow()),
            }
        }
    }

    Ok(())
}

async fn run_score(
    index: &KeywordIndex,
    args: ScoreArgs,
    client: Option<&OllamaClient>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let documents = match &args.text {
        Some(text) => vec![Document {
            name: "inline".to_string(),
            source: "--text".to_string(),
            text: text.clone(),
        }],
        None if args.paths.is_empty() => bail!("Nothing to score: pass file paths or --text"),
        None => ingest::ingest_paths(&args.paths, &args.csv_column)?,
    };

    if documents.is_empty() {
        bail!("No documents found in the given paths");
    }

    let mut scored: Vec<ScoredDocument> = documents
        .iter()
        .map(|doc| ScoredDocument {
            name: doc.name.clone(),
            source: doc.source.clone(),
            assessment: score_and_classify(index, &doc.text),
            explanation: None,
        })
        .collect();

    if let Some(client) = client {
        explain_all(client, &documents, &mut scored, quiet).await;
    }

    // --pdf implies PDF format
    let report_format = match &args.pdf {
        Some(_) => ReportFormat::Pdf,
        None => args.report,
    };
    let pdf_path = args
        .pdf
        .unwrap_or_else(|| PathBuf::from("esg-report.pdf"));

    match report_format {
        ReportFormat::Terminal => report::terminal::render(&scored, verbose, quiet)?,
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&scored)?),
        ReportFormat::Pdf => report::pdf::render(&scored, &pdf_path)?,
    }

    if let Some(threshold) = args.fail_below {
        let failing = scored
            .iter()
            .filter(|d| d.assessment.rating < threshold)
            .count();
        if failing > 0 {
            tracing::warn!(failing, %threshold, "documents rated below threshold");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Ask the LLM to explain every rating, a few requests at a time.
///
/// A failed request leaves that document without an explanation.
async fn explain_all(
    client: &OllamaClient,
    documents: &[Document],
    scored: &mut [ScoredDocument],
    quiet: bool,
) {
    use futures::future::join_all;

    // Local models serve one or two requests at a time.
    const BATCH_SIZE: usize = 4;

    let pb = if !quiet {
        let pb = ProgressBar::new(scored.len() as u64);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(e) => tracing::debug!(error = %e, "invalid progress template"),
        }
        pb.set_message("explaining");
        Some(pb)
    } else {
        None
    };

    for (docs, items) in documents
        .chunks(BATCH_SIZE)
        .zip(scored.chunks_mut(BATCH_SIZE))
    {
        let futures: Vec<_> = docs
            .iter()
            .zip(items.iter())
            .map(|(doc, item)| {
                let prompt = prompts::explain_prompt(
                    &doc.text,
                    &item.assessment.scores,
                    item.assessment.rating,
                );
                async move { client.generate(ESG_CONTEXT, &prompt).await }
            })
            .collect();

        let results = join_all(futures).await;

        for (item, result) in items.iter_mut().zip(results) {
            match result {
                Ok(text) => item.explanation = Some(text.trim().to_string()),
                Err(e) => tracing::warn!(document = %item.name, error = %e, "explanation failed"),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }
}

fn run_validate(
    index: &KeywordIndex,
    mock: usize,
    seed: Option<u64>,
    export: Option<Option<PathBuf>>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut scenarios = validate::real_world_scenarios();
    scenarios.extend(validate::generate_mock_scenarios(index, mock, &mut rng));

    let report = validate::validate(index, &scenarios);
    let edge_cases = validate::run_edge_cases(index);

    if quiet {
        println!(
            "Scenarios: {}  Correct: {}  Accuracy: {:.1}%  Status: {}",
            report.total_scenarios,
            report.correct_predictions,
            report.overall_accuracy * 100.0,
            report.performance
        );
    } else {
        report::terminal::render_validation(&report, &edge_cases, verbose);
    }

    if let Some(path) = export {
        let now = Local::now();
        let path = path.unwrap_or_else(|| PathBuf::from(validate::default_export_name(&now)));
        let data = validate::ValidationExport::new(now, &report, &edge_cases, &scenarios);
        validate::export(&path, &data)?;
        eprintln!("  {} results written to {}", "→".cyan(), path.display());
    }

    Ok(())
}

fn read_text_input(input: &TextInput) -> Result<String> {
    match (&input.text, &input.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => read_file(path),
        (None, None) => bail!("Provide a file path or --text"),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
