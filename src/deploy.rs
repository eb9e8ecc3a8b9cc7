//! Push environment variables to a Vercel project via the `vercel` CLI.
//!
//! For each deployable key with a value: remove it from the target
//! environment if it already exists, then add it with the value piped on
//! stdin so it never appears in process arguments.

use crate::config::DeploySection;
use crate::error::Result;
use crate::process::{CommandSpec, ProcessRunner};
use std::collections::HashMap;

/// Variables pushed to the hosting platform, in push order.
pub const DEPLOY_KEYS: [&str; 7] = [
    "POSTGRES_URL",
    "STRIPE_SECRET_KEY",
    "STRIPE_WEBHOOK_SECRET",
    "AUTH_SECRET",
    "BASE_URL",
    "POSTHOG_API_KEY",
    "POSTHOG_HOST",
];

/// What happened to one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// No value available
    Skipped,
    /// Added fresh
    Added,
    /// Existing value removed, then added
    Replaced,
}

#[derive(Debug, Clone, Default)]
pub struct DeployReport {
    pub outcomes: Vec<(&'static str, KeyOutcome)>,
}

impl DeployReport {
    pub fn pushed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o != KeyOutcome::Skipped)
            .count()
    }

    pub fn skipped(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == KeyOutcome::Skipped)
            .map(|(k, _)| *k)
            .collect()
    }
}

/// Resolve deploy values. `primary` (process environment) wins over
/// `fallback` (dotenv file). Empty values count as missing.
pub fn resolve_values(
    primary: &HashMap<String, String>,
    fallback: &HashMap<String, String>,
) -> Vec<(&'static str, Option<String>)> {
    DEPLOY_KEYS
        .iter()
        .map(|key| {
            let value = [primary.get(*key), fallback.get(*key)]
                .into_iter()
                .flatten()
                .find(|v| !v.is_empty())
                .cloned();
            (*key, value)
        })
        .collect()
}

/// Names already defined in the target environment, or `None` if listing failed.
fn list_existing(runner: &dyn ProcessRunner, deploy: &DeploySection) -> Option<String> {
    let cmd = CommandSpec::new(&deploy.vercel).args(["env", "ls", deploy.environment.as_str()]);
    match runner.run(&cmd) {
        Ok(out) if out.success() => Some(out.stdout),
        Ok(out) => {
            tracing::warn!(status = %out.status_text(), "vercel env ls failed, skipping removals");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "vercel env ls failed, skipping removals");
            None
        }
    }
}

fn is_listed(listing: &str, key: &str) -> bool {
    listing
        .split(|c: char| c.is_whitespace() || c == '│' || c == '|')
        .any(|word| word == key)
}

/// Push every resolved value. A failed `add` aborts the run.
pub fn push(
    runner: &dyn ProcessRunner,
    deploy: &DeploySection,
    values: &[(&'static str, Option<String>)],
) -> Result<DeployReport> {
    let mut report = DeployReport::default();
    let listing = list_existing(runner, deploy);
    let env_name = deploy.environment.as_str();

    for &(key, ref value) in values {
        let Some(value) = value else {
            println!("Warning: Environment variable {} is not set or empty", key);
            report.outcomes.push((key, KeyOutcome::Skipped));
            continue;
        };

        let exists = listing.as_deref().is_some_and(|l| is_listed(l, key));
        if exists {
            println!("Removing existing {}...", key);
            let rm = CommandSpec::new(&deploy.vercel).args(["env", "rm", key, env_name, "-y"]);
            match runner.run(&rm) {
                Ok(out) if out.success() => {}
                Ok(out) => tracing::warn!(key, status = %out.status_text(), "removal failed"),
                Err(e) => tracing::warn!(key, error = %e, "removal failed"),
            }
        }

        println!("Setting {}...", key);
        let add = CommandSpec::new(&deploy.vercel)
            .args(["env", "add", key, env_name])
            .stdin(value.as_str());
        runner
            .run(&add)?
            .check(&deploy.vercel, &format!("Failed to set {}", key))?;

        report.outcomes.push((
            key,
            if exists {
                KeyOutcome::Replaced
            } else {
                KeyOutcome::Added
            },
        ));
    }

    Ok(report)
}
