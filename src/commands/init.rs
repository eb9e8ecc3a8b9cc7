//! Init command - collect values and write the .env file

use anyhow::Result;
use colored::Colorize;
use setup_dotenv::collector::{self, Answers, Collector};
use setup_dotenv::{SetupConfig, SystemRunner, TerminalPrompter};
use std::path::PathBuf;

pub fn execute(
    config: &SetupConfig,
    output: Option<PathBuf>,
    host: Option<String>,
    port: Option<String>,
) -> Result<()> {
    let output = output_path(config, output);

    let mut prompter = TerminalPrompter::new();
    let runner = SystemRunner;

    let env = Collector::new(config)
        .with_answers(Answers { host, port })
        .collect(&mut prompter, &runner)?;
    collector::persist(&env, &output)?;

    println!("{} Setup complete", "✓".green());
    Ok(())
}

/// `--output` if given, else the configured default.
fn output_path(config: &SetupConfig, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| config.defaults.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_defaults_to_dotenv() {
        let config = SetupConfig::default();
        assert_eq!(output_path(&config, None), PathBuf::from(".env"));
    }

    #[test]
    fn test_output_flag_overrides_config() {
        let mut config = SetupConfig::default();
        config.defaults.output = PathBuf::from("config.env");

        assert_eq!(output_path(&config, None), PathBuf::from("config.env"));
        assert_eq!(
            output_path(&config, Some(PathBuf::from("flag.env"))),
            PathBuf::from("flag.env")
        );
    }
}
