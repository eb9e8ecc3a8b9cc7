//! Error taxonomy for the setup workflow.
//!
//! Every collection step returns [`Result`]; the first failure ends the run.

use std::io;
use std::path::PathBuf;

/// Failures that abort a setup or deploy run.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// User-supplied value rejected before anything else ran
    #[error("{0}")]
    InvalidInput(String),

    /// Program is not on PATH
    #[error("'{program}' not found on PATH. Install it and try again")]
    ProgramNotFound { program: String },

    /// Program ran but exited non-zero
    #[error("{context}: '{program}' exited with {status}\nstdout: {stdout}\nstderr: {stderr}")]
    ExternalProcess {
        context: String,
        program: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    /// Program exited 0 but printed something other than what was expected
    #[error("{context}: unexpected output {output:?}")]
    UnexpectedOutput { context: String, output: String },

    /// Dotenv map is missing required keys
    #[error("missing required variables: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),

    #[error("failed to read env file {}: {message}", .path.display())]
    EnvFile { path: PathBuf, message: String },

    #[error("failed to parse config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_process_message_carries_output() {
        let err = SetupError::ExternalProcess {
            context: "Failed getting a Stripe local webhook secret".to_string(),
            program: "docker".to_string(),
            status: "exit status: 1".to_string(),
            stdout: "".to_string(),
            stderr: "unauthorized".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("docker"));
        assert!(msg.contains("stderr: unauthorized"));
    }

    #[test]
    fn test_incomplete_lists_keys() {
        let err = SetupError::Incomplete(vec!["HOST", "PORT"]);
        assert_eq!(err.to_string(), "missing required variables: HOST, PORT");
    }
}
