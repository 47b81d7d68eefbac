use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "jagged",
    version,
    about = "Likert self-assessment scorer for jagged learning profiles"
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a complete response set
    Score(ScoreArgs),
    /// Score with unanswered statements counted as neutral (demo only)
    Preview(ScoreArgs),
    /// List the statements of the question bank
    Questions(QuestionsArgs),
    /// List the canonical dimension set
    Dimensions(DimensionsArgs),
    /// Write a blank responses file to fill in
    Template(TemplateArgs),
    /// Write a default jagged.toml into the current directory
    Init(InitArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Question bank TOML to use instead of the built-in battery
    #[arg(long)]
    pub bank: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct OrderArgs {
    /// Present statements in a shuffled order
    #[arg(long)]
    pub shuffle: bool,
    /// Seed for --shuffle, for a reproducible order
    #[arg(long, requires = "shuffle")]
    pub seed: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    /// Responses file (.toml or .json) mapping statement id to rating
    #[arg(short, long)]
    pub responses: PathBuf,
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long)]
    pub json: bool,
    /// Number of top strengths to report (defaults to general.top_n)
    #[arg(long)]
    pub top: Option<usize>,
    /// Include raw and maximum weighted sums per dimension
    #[arg(long)]
    pub diagnostics: bool,
}

#[derive(Debug, Args, Clone)]
pub struct QuestionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub order: OrderArgs,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct DimensionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TemplateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub order: OrderArgs,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}
