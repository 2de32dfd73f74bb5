use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::Rating;

#[derive(Parser, Debug)]
#[command(
    name = "esg-rater",
    about = "Rate business descriptions for ESG keyword coverage",
    version
)]
pub struct Cli {
    /// Config file [default: ./.esg-rater/config.toml, fallback ~/.config/esg-rater/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// Show every row instead of only the ones needing attention
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score text files, directories of .txt files, or CSV rows
    Score(ScoreArgs),

    /// Write a feature CSV with per-category keyword counts
    Dataset {
        /// Text files, directories, or CSV files to read
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output CSV path
        #[arg(short, long, default_value = "esg_features.csv")]
        output: PathBuf,

        /// Also write total_esg and sustainability_label columns
        #[arg(long)]
        label: bool,

        /// CSV column holding the text
        #[arg(long, default_value = "text", value_name = "COLUMN")]
        csv_column: String,
    },

    /// Add total_esg and sustainability_label columns to a feature CSV
    Label {
        /// Feature CSV with env_score, soc_score and gov_score columns
        input: PathBuf,

        /// Output path [default: overwrite the input]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check classifier agreement on real-world and generated scenarios
    Validate {
        /// Number of generated mock scenarios
        #[arg(long, default_value_t = 15)]
        mock: usize,

        /// RNG seed for mock scenarios [default: random]
        #[arg(long)]
        seed: Option<u64>,

        /// Write JSON results; without a value uses a timestamped name
        #[arg(long, value_name = "FILE", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },

    /// Score a business idea and ask the LLM to explain the rating
    Explain(TextInput),

    /// Generate sustainable business ideas and score each one
    Ideas {
        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        focus: Option<String>,

        /// Number of ideas to request
        #[arg(long, default_value_t = 3)]
        count: usize,
    },

    /// Ask the LLM a question about ESG and sustainability
    Ask {
        question: String,
    },

    /// Ask the LLM to strengthen the weakest ESG dimensions of an idea
    Improve(TextInput),

    /// Ask the LLM for an ESG-focused business plan outline
    Plan(TextInput),

    /// Show installed LLM models and the recommended one
    Status,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Text files, directories of .txt files, or CSV files
    pub paths: Vec<PathBuf>,

    /// Score this text instead of reading files
    #[arg(long, conflicts_with = "paths")]
    pub text: Option<String>,

    /// CSV column holding the text
    #[arg(long, default_value = "text", value_name = "COLUMN")]
    pub csv_column: String,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// PDF output path; use without value to default to esg-report.pdf
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "esg-report.pdf")]
    pub pdf: Option<PathBuf>,

    /// Ask the LLM to explain each rating
    #[arg(long)]
    pub explain: bool,

    /// Exit with code 1 if any document is rated below this
    #[arg(long, value_name = "RATING")]
    pub fail_below: Option<Rating>,
}

/// Business idea given inline or as a file path.
#[derive(Args, Debug)]
pub struct TextInput {
    /// File containing the business idea
    #[arg(required_unless_present = "text")]
    pub file: Option<PathBuf>,

    /// Business idea text
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Pdf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_score_with_inline_text() {
        let cli = Cli::parse_from(["esg-rater", "score", "--text", "carbon", "--fail-below", "medium"]);
        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.text.as_deref(), Some("carbon"));
                assert_eq!(args.fail_below, Some(Rating::Medium));
                assert!(args.paths.is_empty());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_validate_export_without_value() {
        let cli = Cli::parse_from(["esg-rater", "validate", "--export"]);
        match cli.command {
            Command::Validate { export, mock, .. } => {
                assert_eq!(export, Some(None));
                assert_eq!(mock, 15);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_explain_requires_input() {
        assert!(Cli::try_parse_from(["esg-rater", "explain"]).is_err());
        assert!(Cli::try_parse_from(["esg-rater", "explain", "--text", "idea"]).is_ok());
    }
}
