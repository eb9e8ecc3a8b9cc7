//! Deploy command - push environment variables to Vercel
//!
//! Values come from the process environment, falling back to `--env-file`.
//! Secret values are piped on stdin, never passed as arguments.

use anyhow::{Context, Result};
use colored::Colorize;
use setup_dotenv::deploy::{self, KeyOutcome};
use setup_dotenv::{dotenv, SetupConfig, SystemRunner};
use std::collections::HashMap;
use std::path::Path;

pub fn execute(
    config: &SetupConfig,
    env_file: Option<&Path>,
    environment: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let mut target = config.deploy.clone();
    if let Some(environment) = environment {
        target.environment = environment;
    }

    let file_vars = match env_file {
        Some(path) => dotenv::load(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => HashMap::new(),
    };
    let process_vars: HashMap<String, String> = std::env::vars().collect();

    let values = deploy::resolve_values(&process_vars, &file_vars);

    if dry_run {
        println!("Would push to Vercel '{}':", target.environment);
        for (key, value) in &values {
            match value {
                Some(_) => println!("  {} {}", "✓".green(), key),
                None => println!("  {} {} (not set)", "✗".yellow(), key),
            }
        }
        return Ok(());
    }

    let report = deploy::push(&SystemRunner, &target, &values)?;

    let replaced = report
        .outcomes
        .iter()
        .filter(|(_, o)| *o == KeyOutcome::Replaced)
        .count();
    println!(
        "{} Pushed {} variables to '{}' ({} replaced)",
        "✓".green(),
        report.pushed(),
        target.environment,
        replaced
    );

    let skipped = report.skipped();
    if !skipped.is_empty() {
        println!("  Skipped: {}", skipped.join(", "));
    }

    Ok(())
}
