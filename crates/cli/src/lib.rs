//! CLI for loadplan.
//!
//! This crate provides the command-line interface for loadplan: the `plan`
//! subcommand (generate a load test plan from a service profile, optionally
//! interpreting a metrics summary and appending an evidence event) and the
//! `interpret` subcommand (score a metrics summary against a profile's
//! SLOs). All decision logic lives in `loadplan-core`; this crate only wires
//! loading, generation, interpretation, and logging together and maps
//! failures to a non-zero exit status.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use loadplan_core::{
    generate, interpret, EvidenceEvent, InterpretationResult, MetricsSummary, Outcome, Verdict,
};
use loadplan_storage::{append_event, load_metrics, load_profile, write_plan};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// loadplan CLI.
#[derive(Parser, Debug)]
#[command(name = "loadplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a load test plan from a service profile.
    Plan {
        /// Path to a service profile file (YAML or JSON).
        #[arg(long)]
        profile: PathBuf,

        /// Optional output path for the generated plan (JSON). Prints to
        /// stdout if omitted.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Optional path to a metrics summary (JSON or CSV) for
        /// interpretation.
        #[arg(long)]
        metrics: Option<PathBuf>,

        /// Optional path to the evidence log (JSONL). Appends an entry when
        /// provided.
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Interpret a metrics summary against a service profile's SLOs.
    Interpret {
        /// Path to the service profile to evaluate against.
        #[arg(long)]
        profile: PathBuf,

        /// Path to a metrics summary file (JSON or CSV).
        #[arg(long)]
        metrics: PathBuf,
    },
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if loading, validation, or
/// writing fails. An interpretation that fails its checks is still a
/// successful operation.
pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            profile,
            out,
            metrics,
            log,
        } => run_plan(&profile, out.as_deref(), metrics.as_deref(), log.as_deref()),
        Commands::Interpret { profile, metrics } => run_interpret(&profile, &metrics),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_plan(
    profile_path: &Path,
    out: Option<&Path>,
    metrics: Option<&Path>,
    log: Option<&Path>,
) -> Result<()> {
    let profile = load_profile(profile_path)?;
    let plan = generate(&profile);
    tracing::debug!(service = %plan.service, scenarios = plan.scenarios.len(), "plan generated");

    match out {
        Some(out_path) => {
            write_plan(&plan, out_path)?;
            println!("Plan written to {}", out_path.display());
        }
        None => println!("{}", plan.to_json()?),
    }

    let mut interpretation = false;
    let mut outcome = Outcome::PlanGenerated;

    if let Some(metrics_path) = metrics {
        // The plan itself already succeeded: an unreadable metrics file
        // downgrades to a warning instead of failing the invocation.
        match load_metrics(metrics_path) {
            Ok((summary, warnings)) => {
                for warning in &warnings {
                    eprintln!("Warning: {warning}");
                }
                let result = interpret(&profile, &summary);
                interpretation = true;
                println!("\n--- Metrics Interpretation ---");
                print_verdict(&result, &summary);
                outcome = if result.status == Verdict::Fail {
                    Outcome::IssuesDetected
                } else {
                    Outcome::PlanAndInterpretationGenerated
                };
            }
            Err(e) => eprintln!("Warning: could not interpret metrics: {e}"),
        }
    }

    if let Some(log_path) = log {
        let event = EvidenceEvent::new(
            profile.service.clone(),
            profile_path.display().to_string(),
            plan.scenario_names(),
            interpretation,
            outcome,
        );
        append_event(&event, log_path)?;
        println!("Evidence logged to {}", log_path.display());
    }

    Ok(())
}

fn run_interpret(profile_path: &Path, metrics_path: &Path) -> Result<()> {
    let profile = load_profile(profile_path)?;
    let (summary, warnings) = load_metrics(metrics_path)?;
    for warning in &warnings {
        eprintln!("Warning: {warning}");
    }

    let result = interpret(&profile, &summary);
    print_verdict(&result, &summary);
    println!("\n{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

fn print_verdict(result: &InterpretationResult, summary: &MetricsSummary) {
    let status = match result.status {
        Verdict::Pass => "PASS".green(),
        Verdict::Fail => "FAIL".red(),
        Verdict::Indeterminate => "INDETERMINATE".yellow(),
    };
    println!("Status: {status}");
    println!("{}", result.narrative(summary));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_command_parses() {
        let cli = Cli::try_parse_from([
            "loadplan",
            "plan",
            "--profile",
            "profiles/checkout.yaml",
            "--out",
            "plan.json",
            "--metrics",
            "metrics.json",
            "--log",
            "evidence.jsonl",
        ])
        .unwrap();
        let Commands::Plan {
            profile,
            out,
            metrics,
            log,
        } = cli.command
        else {
            panic!("expected plan command");
        };
        assert_eq!(profile, PathBuf::from("profiles/checkout.yaml"));
        assert_eq!(out, Some(PathBuf::from("plan.json")));
        assert_eq!(metrics, Some(PathBuf::from("metrics.json")));
        assert_eq!(log, Some(PathBuf::from("evidence.jsonl")));
    }

    #[test]
    fn test_plan_requires_profile() {
        assert!(Cli::try_parse_from(["loadplan", "plan"]).is_err());
    }

    #[test]
    fn test_interpret_requires_both_paths() {
        assert!(Cli::try_parse_from([
            "loadplan",
            "interpret",
            "--profile",
            "profiles/checkout.yaml"
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "loadplan",
            "interpret",
            "--profile",
            "profiles/checkout.yaml",
            "--metrics",
            "metrics.csv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Interpret { .. }));
    }
}
