use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::llm::prompts::BusinessIdea;
use crate::models::{Assessment, Rating, ScoredDocument};
use crate::validate::{EdgeCaseResult, ValidationReport};

/// Render a colored terminal report.
pub fn render(docs: &[ScoredDocument], verbose: bool, quiet: bool) -> Result<()> {
    let total = docs.len();
    let high_count = count_rating(docs, Rating::High);
    let medium_count = count_rating(docs, Rating::Medium);
    let low_count = count_rating(docs, Rating::Low);

    if quiet {
        println!(
            "Documents: {}  High: {}  Medium: {}  Low: {}",
            total,
            high_count.to_string().green(),
            medium_count.to_string().yellow(),
            low_count.to_string().red(),
        );
        return Ok(());
    }

    println!("\n {} v{}\n", "esg-rater".bold(), env!("CARGO_PKG_VERSION"));

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Documents scored : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  High            : {:>4}", "▲".green(), high_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Medium          : {:>4}", "■".yellow(), medium_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Low             : {:>4}", "▼".red(), low_count)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    // A single document is always shown in full.
    if verbose || total == 1 {
        render_table(docs, None);
        println!();
        render_document_explanations(docs);
        return Ok(());
    }

    for (rating, label) in [
        (Rating::Low, "[LOW]".red().bold()),
        (Rating::Medium, "[MEDIUM]".yellow().bold()),
    ] {
        if count_rating(docs, rating) > 0 {
            println!(" {} Documents rated {}:\n", label, rating);
            render_table(docs, Some(rating));
            println!();
        }
    }

    render_document_explanations(docs);
    Ok(())
}

fn render_document_explanations(docs: &[ScoredDocument]) {
    for block in docs.iter().filter_map(explanation_block) {
        print!("{}", block);
    }
}

fn explanation_block(doc: &ScoredDocument) -> Option<String> {
    doc.explanation.as_ref().map(|text| {
        format!(
            " {} {} ({})\n\n{}\n\n",
            "→".cyan(),
            doc.name.bold(),
            doc.assessment.rating,
            text
        )
    })
}

fn count_rating(docs: &[ScoredDocument], rating: Rating) -> usize {
    docs.iter().filter(|d| d.assessment.rating == rating).count()
}

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::High => Color::Green,
        Rating::Medium => Color::Yellow,
        Rating::Low => Color::Red,
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

fn render_table(docs: &[ScoredDocument], rating_filter: Option<Rating>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&[
            "Document",
            "Source",
            "Env",
            "Social",
            "Gov",
            "Total",
            "Rating",
            "Dominance",
        ]));

    for doc in docs
        .iter()
        .filter(|d| rating_filter.map_or(true, |r| d.assessment.rating == r))
    {
        let a = &doc.assessment;
        table.add_row(vec![
            Cell::new(&doc.name),
            Cell::new(&doc.source),
            Cell::new(a.scores.environment).set_alignment(CellAlignment::Right),
            Cell::new(a.scores.social).set_alignment(CellAlignment::Right),
            Cell::new(a.scores.governance).set_alignment(CellAlignment::Right),
            Cell::new(a.total).set_alignment(CellAlignment::Right),
            Cell::new(a.rating.to_string())
                .fg(rating_color(a.rating))
                .set_alignment(CellAlignment::Center),
            Cell::new(format!("{:.0}%", a.confidence * 100.0)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

/// Print an assessment followed by the LLM's text.
pub fn render_explanation(assessment: &Assessment, model: &str, text: &str) {
    let a = assessment;
    println!(
        "\n {} E={} S={} G={}  total {}  rating {}  dominance {:.0}%",
        "Scores:".bold(),
        a.scores.environment,
        a.scores.social,
        a.scores.governance,
        a.total,
        a.rating.to_string().bold(),
        a.confidence * 100.0
    );
    render_llm_text(model, text);
}

pub fn render_llm_text(model: &str, text: &str) {
    println!("\n {} {}\n", "→".cyan(), model.dimmed());
    println!("{}\n", text.trim());
}

/// Table of generated ideas with the keyword rating of each. `verbose` adds
/// the per-dimension notes the model gave for every idea.
pub fn render_ideas(ideas: &[(BusinessIdea, Assessment)], verbose: bool) {
    if ideas.is_empty() {
        println!(" {} The model reply contained no parseable ideas.", "⚠".yellow());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["#", "Idea", "Concept", "SDGs", "Total", "Rating"]));

    for (i, (idea, a)) in ideas.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&idea.title),
            Cell::new(&idea.concept),
            Cell::new(&idea.sdgs),
            Cell::new(a.total).set_alignment(CellAlignment::Right),
            Cell::new(a.rating.to_string()).fg(rating_color(a.rating)),
        ]);
    }

    println!("{}", table);

    if verbose {
        for (i, (idea, _)) in ideas.iter().enumerate() {
            println!("\n {} {}", format!("#{}", i + 1).bold(), idea.title.bold());
            for (label, value) in idea_details(idea) {
                println!("   {:<14} {}", label, value);
            }
        }
        println!();
    }
}

fn idea_details(idea: &BusinessIdea) -> Vec<(&'static str, &str)> {
    [
        ("Environmental", idea.environmental.as_str()),
        ("Social", idea.social.as_str()),
        ("Governance", idea.governance.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .collect()
}

/// Render validator output: accuracy summary, per-type accuracy, edge cases.
pub fn render_validation(report: &ValidationReport, edge_cases: &[EdgeCaseResult], verbose: bool) {
    println!("\n {}\n", "PREDICTION VALIDATION REPORT".bold());
    println!("   Scenarios tested    : {}", report.total_scenarios);
    println!("   Correct predictions : {}", report.correct_predictions);
    println!("   Overall accuracy    : {:.1}%", report.overall_accuracy * 100.0);
    println!("   Average dominance   : {:.1}%", report.average_confidence * 100.0);

    println!("\n {}", "Accuracy by data type:".bold());
    for (data_type, acc) in &report.accuracy_by_type {
        println!(
            "   {:<12} {:.1}% ({}/{})",
            data_type.to_string(),
            acc.ratio() * 100.0,
            acc.correct,
            acc.total
        );
    }

    let status = match report.performance {
        crate::validate::Performance::Excellent => report.performance.to_string().green(),
        crate::validate::Performance::Good => report.performance.to_string().yellow(),
        crate::validate::Performance::Moderate => report.performance.to_string().truecolor(255, 140, 0),
        crate::validate::Performance::Poor => report.performance.to_string().red(),
    };
    println!("\n   Status: {}  {}", status.bold(), report.performance.recommendation());

    let b = report.confidence_buckets;
    println!("\n {}", "Dominance distribution:".bold());
    println!("   High (>70%)      : {}", b.high);
    println!("   Medium (30-70%)  : {}", b.medium);
    println!("   Low (<30%)       : {}", b.low);

    if verbose {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header(&["Scenario", "Expected", "Predicted", "E/S/G", "Result"]));
        for r in &report.results {
            let (mark, color) = if r.correct {
                ("✓", Color::Green)
            } else {
                ("✗", Color::Red)
            };
            table.add_row(vec![
                Cell::new(&r.scenario_id),
                Cell::new(r.expected.to_string()),
                Cell::new(r.predicted.to_string()),
                Cell::new(format!(
                    "{}/{}/{}",
                    r.esg_scores.environment, r.esg_scores.social, r.esg_scores.governance
                )),
                Cell::new(mark).fg(color).set_alignment(CellAlignment::Center),
            ]);
        }
        println!("\n{}", table);
    }

    println!("\n {}", "Edge cases:".bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["Case", "Total", "Rating", "Dominance", "Expected behavior"]));
    for case in edge_cases {
        table.add_row(vec![
            Cell::new(case.name),
            Cell::new(case.total_score).set_alignment(CellAlignment::Right),
            Cell::new(case.prediction.to_string()).fg(rating_color(case.prediction)),
            Cell::new(format!("{:.0}%", case.confidence * 100.0)).set_alignment(CellAlignment::Right),
            Cell::new(case.expected_behavior),
        ]);
    }
    println!("{}\n", table);
}
