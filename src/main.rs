use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Environment variable holding the log filter (e.g. `debug`, `setup_dotenv=trace`)
const LOG_ENV_VAR: &str = "SETUP_DOTENV_LOG";

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Generate a local .env for the SaaS starter", long_about = None)]
struct Cli {
    /// Config file (default: ./setup-dotenv.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    init: InitArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect values interactively and write the .env file (default)
    Init {
        #[command(flatten)]
        args: InitArgs,
    },

    /// Push environment variables to Vercel
    Deploy {
        /// Read values from this dotenv file (process environment wins)
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Vercel environment (default: production)
        #[arg(long)]
        environment: Option<String>,

        /// Show what would be pushed without calling vercel
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

/// Options for the setup run
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
struct InitArgs {
    /// Output file (default: ./.env)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hostname, skips the hostname prompt (accepts host:port)
    #[arg(long)]
    host: Option<String>,

    /// Port, skips the port prompt
    #[arg(long)]
    port: Option<String>,
}

impl InitArgs {
    /// Fill unset options from `outer` (flags given before the subcommand).
    fn or(self, outer: InitArgs) -> InitArgs {
        InitArgs {
            output: self.output.or(outer.output),
            host: self.host.or(outer.host),
            port: self.port.or(outer.port),
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Init { args }) => {
            let args = args.or(cli.init);
            commands::init::execute(&config, args.output, args.host, args.port)?;
        }
        Some(Commands::Deploy {
            env_file,
            environment,
            dry_run,
        }) => {
            commands::deploy::execute(&config, env_file.as_deref(), environment, dry_run)?;
        }
        None => {
            // Bare `setup-dotenv` runs init
            let args = cli.init;
            commands::init::execute(&config, args.output, args.host, args.port)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_args(argv: &[&str]) -> InitArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Some(Commands::Init { args }) => args.or(cli.init),
            Some(Commands::Deploy { .. }) => panic!("parsed as deploy"),
            None => cli.init,
        }
    }

    #[test]
    fn test_flags_before_init_are_kept() {
        let args = init_args(&[
            "setup-dotenv", "--output", "other.env", "--host", "myhost", "--port", "9", "init",
        ]);
        assert_eq!(args.output, Some(PathBuf::from("other.env")));
        assert_eq!(args.host.as_deref(), Some("myhost"));
        assert_eq!(args.port.as_deref(), Some("9"));
    }

    #[test]
    fn test_init_flags_win_over_outer_flags() {
        let args = init_args(&[
            "setup-dotenv", "--host", "outer", "--port", "1", "init", "--host", "inner",
        ]);
        assert_eq!(args.host.as_deref(), Some("inner"));
        assert_eq!(args.port.as_deref(), Some("1"));
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_bare_invocation_uses_top_level_flags() {
        let args = init_args(&["setup-dotenv", "-o", "x.env"]);
        assert_eq!(args.output, Some(PathBuf::from("x.env")));
        assert_eq!(args.host, None);
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["setup-dotenv", "deploy", "--config", "ci.toml", "-n"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
        assert!(matches!(cli.command, Some(Commands::Deploy { dry_run: true, .. })));
    }
}
