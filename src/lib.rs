pub mod collector;
pub mod config;
pub mod deploy;
pub mod dotenv;
pub mod error;
pub mod process;
pub mod prompt;
pub mod secret;
pub mod stripe;

// Re-export commonly used types
pub use collector::{Answers, BaseUrl, Collector};
pub use config::SetupConfig;
pub use dotenv::{Dotenv, EnvKey};
pub use error::{Result, SetupError};
pub use process::{CommandSpec, ProcessOutput, ProcessRunner, SystemRunner};
pub use prompt::{LinePrompter, Prompter, TerminalPrompter};
