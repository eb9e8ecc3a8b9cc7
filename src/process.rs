//! Scoped subprocess execution with captured output.

use crate::error::{Result, SetupError};
use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};

/// A program invocation: program, arguments, and optional stdin payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit status: {}", code),
            None => "terminated by signal".to_string(),
        }
    }

    /// Turn a non-zero exit into [`SetupError::ExternalProcess`].
    pub fn check(self, program: &str, context: &str) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }

        Err(SetupError::ExternalProcess {
            context: context.to_string(),
            program: program.to_string(),
            status: self.status_text(),
            stdout: self.stdout,
            stderr: self.stderr,
        })
    }
}

/// Runs a command to completion and captures what it printed.
pub trait ProcessRunner {
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput>;
}

/// Runs real processes. Blocks until exit, no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput> {
        let program = which::which(&command.program).map_err(|_| SetupError::ProgramNotFound {
            program: command.program.clone(),
        })?;

        tracing::debug!(program = %program.display(), args = command.args.len(), "spawning");

        let mut child = Command::new(&program)
            .args(&command.args)
            .stdin(if command.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Reap the child even when the write fails
        let written = match (&command.stdin, child.stdin.take()) {
            (Some(input), Some(mut stdin)) => write_stdin(&mut stdin, input),
            _ => Ok(()),
        };

        let output = child.wait_with_output()?;
        tracing::debug!(program = %command.program, code = ?output.status.code(), "process exited");

        let output = ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        match written {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!(program = %command.program, "stdin closed early by child");
                Ok(output)
            }
            Err(e) => Err(SetupError::ExternalProcess {
                context: format!("Failed writing stdin: {}", e),
                program: command.program.clone(),
                status: output.status_text(),
                stdout: output.stdout,
                stderr: output.stderr,
            }),
            Ok(()) => Ok(output),
        }
    }
}

fn write_stdin(stdin: &mut impl Write, input: &str) -> io::Result<()> {
    stdin.write_all(input.as_bytes())?;
    stdin.flush()
}
