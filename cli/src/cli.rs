use std::path::PathBuf;

/// Survey reweighting CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "pollweight", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Reweight one poll's responses to match target proportions (rewrites the data file)
    Rake(RakeArgs),

    /// Generate synthetic responses for the bundled demo polls
    Populate(PopulateArgs),

    /// Print weighted candidate shares for a poll
    Topline(ToplineArgs),
}

#[derive(clap::Args, Debug)]
pub struct RakeArgs {
    /// Survey results CSV (id, poll, candidate, dimensions..., weight)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,

    /// Request JSON: {"poll": ..., "target_weights": {dimension: {category: proportion}}}
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub request: PathBuf,

    /// TOML file with tolerance / max_iterations / strict
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Convergence threshold on the largest weight change per pass
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Maximum number of passes
    #[arg(short = 'n', long)]
    pub max_iterations: Option<usize>,

    /// Reject malformed targets instead of ignoring them
    #[arg(long)]
    pub strict: bool,

    /// Write the JSON report here instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct PopulateArgs {
    /// Output CSV, defaults to "./survey_results.csv"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Responses per poll
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub responses: usize,

    /// Random seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Also write each poll's default targets as request JSON into this directory
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub targets_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ToplineArgs {
    /// Survey results CSV
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,

    /// Poll name
    pub poll: String,

    /// Restrict a dimension, e.g. --filter "age=18-29,30-44" (repeatable)
    #[arg(short, long)]
    pub filter: Vec<String>,

    /// Hypothetical subgroup vote, e.g. --scenario "age=18-29:Candidate A=0.6"
    #[arg(long)]
    pub scenario: Option<String>,
}
