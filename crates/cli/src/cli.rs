use clap::{Args, Parser, Subcommand, ValueEnum};
use eventmatch_core::AlignmentPolicy;
use serde::{Deserialize, Serialize};

/// Event-level evaluation of anomaly detections against technician labels.
///
/// Label and detection flags are grouped into events, events are matched by
/// any-point overlap, and the outcome is reported as point-level confusion
/// counts with PPV, NPV, accuracy, recall, F1 and F2.
#[derive(Parser, Debug)]
#[command(name = "eventmatch", version, about)]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/eventmatch/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output format (overrides config file)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate precomputed detection flags against qualifier labels.
    Evaluate(EvaluateArgs),
    /// Run rule-based detection on observations, then evaluate it.
    Detect(DetectArgs),
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// JSON input with `labels` and `detections` ("-" for stdin)
    #[arg(long, short)]
    pub input: String,

    /// Handling of detection timestamps missing from the label timeline: reject or truncate
    #[arg(long)]
    pub alignment: Option<AlignmentPolicy>,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// JSON input with `observations` ("-" for stdin)
    #[arg(long, short)]
    pub input: String,

    /// Lowest acceptable value
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Highest acceptable value
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,

    /// Flag runs of at least this many repeated values
    #[arg(long)]
    pub persistence: Option<usize>,

    /// Include interpolated corrections of flagged points in JSON output
    #[arg(long)]
    pub corrected: bool,

    /// Maximum consecutive points filled per gap when correcting
    #[arg(long)]
    pub interpolation_limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
