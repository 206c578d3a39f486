mod cli;
mod config;
mod input;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use eventmatch_core::config::load_dotenv;
use eventmatch_core::{Config, FlagSeries};
use eventmatch_eval::evaluate;
use eventmatch_rules::{interpolate, RuleSet};

use crate::cli::{CliArgs, Command, DetectArgs, EvaluateArgs, OutputFormat};
use crate::config::CliConfig;
use crate::input::{read_json, DetectInput, EvaluateInput};
use crate::report::{render_text, Summary};

fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let env_config = Config::from_env();
    env_config.log_summary();

    let args = CliArgs::parse();
    let file_config =
        CliConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    let format = file_config.resolve_format(args.format);

    let summary = match args.command {
        Command::Evaluate(cmd) => run_evaluate(&cmd, &file_config, &env_config)?,
        Command::Detect(cmd) => run_detect(&cmd, &file_config, &env_config)?,
    };

    match format {
        OutputFormat::Text => print!("{}", render_text(&summary)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to serialize report")?
        ),
    }
    Ok(())
}

fn run_evaluate(cmd: &EvaluateArgs, file_config: &CliConfig, env: &Config) -> Result<Summary> {
    let input: EvaluateInput = read_json(&cmd.input)?;
    let policy = file_config.resolve_alignment(cmd.alignment, env);
    let name = input.name.clone().unwrap_or_else(|| cmd.input.clone());
    info!(name = %name, alignment = %policy, "Evaluating detections");

    let labels = input.label_series()?;
    let detections = input.detection_series()?;
    let eval = evaluate(&labels, &detections, policy)
        .with_context(|| format!("evaluation of '{}' failed", name))?;

    Ok(Summary::new(name, &eval))
}

fn run_detect(cmd: &DetectArgs, file_config: &CliConfig, env: &Config) -> Result<Summary> {
    let input: DetectInput = read_json(&cmd.input)?;
    let name = input.name.clone().unwrap_or_else(|| cmd.input.clone());

    let mut rules_config = file_config.resolve_rules(env);
    rules_config.range_min = cmd.min.or(rules_config.range_min);
    rules_config.range_max = cmd.max.or(rules_config.range_max);
    rules_config.persistence_length = cmd.persistence.or(rules_config.persistence_length);
    if let Some(limit) = cmd.interpolation_limit {
        rules_config.interpolation_limit = limit;
    }

    let rules = RuleSet::from_config(&rules_config).context("invalid rule configuration")?;
    if rules.is_empty() {
        tracing::warn!("No rules configured; every point will be treated as normal");
    }
    let policy = file_config.resolve_alignment(None, env);
    info!(name = %name, rules = ?rules, alignment = %policy, "Running rule-based detection");

    let values = input.values();
    let flags = rules.detect(&values)?;
    let labels = input.label_series()?;
    let detections = FlagSeries::new("detections", input.timestamps(), flags.clone())?;
    let eval = evaluate(&labels, &detections, policy)
        .with_context(|| format!("evaluation of '{}' failed", name))?;

    let summary = Summary::new(name, &eval);
    if cmd.corrected {
        let corrected = interpolate(&values, &flags, rules_config.interpolation_limit)?;
        return Ok(summary.with_corrected(corrected));
    }
    Ok(summary)
}
