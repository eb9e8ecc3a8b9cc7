//! Interactive input.
//!
//! [`Prompter`] is the seam between the collector and the user. The binary
//! uses [`TerminalPrompter`]; tests drive [`LinePrompter`] with in-memory input.

use std::io::{self, BufRead, Write};

/// Source of answers to free-text questions.
pub trait Prompter {
    /// Ask a question and return the answer with surrounding whitespace removed.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Ask for a value that should not be echoed.
    fn ask_secret(&mut self, question: &str) -> io::Result<String> {
        self.ask(question)
    }
}

/// Reads one line per question from any reader, echoing questions to a writer.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }

        Ok(line.trim().to_string())
    }
}

/// Terminal stream used for console prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Pick where console prompts go, or `None` to fall back to plain line reads.
///
/// `console` only reads from a stream that is itself a TTY, so the prompt
/// needs a TTY stdin plus a TTY output stream to write the question to.
pub fn console_stream(stdin_tty: bool, stdout_tty: bool, stderr_tty: bool) -> Option<ConsoleStream> {
    match (stdin_tty, stdout_tty, stderr_tty) {
        (false, _, _) => None,
        (true, true, _) => Some(ConsoleStream::Stdout),
        (true, false, true) => Some(ConsoleStream::Stderr),
        (true, false, false) => None,
    }
}

/// Prompts on the controlling terminal, masking secrets when possible.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    fn console() -> Option<console::Term> {
        let stream = console_stream(
            atty::is(atty::Stream::Stdin),
            atty::is(atty::Stream::Stdout),
            atty::is(atty::Stream::Stderr),
        )?;
        Some(match stream {
            ConsoleStream::Stdout => console::Term::stdout(),
            ConsoleStream::Stderr => console::Term::stderr(),
        })
    }

    fn read_piped(question: &str) -> io::Result<String> {
        let stdin = io::stdin();
        LinePrompter::new(stdin.lock(), io::stdout()).ask(question)
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let Some(term) = Self::console() else {
            return Self::read_piped(question);
        };

        term.write_str(question)?;
        Ok(term.read_line()?.trim().to_string())
    }

    fn ask_secret(&mut self, question: &str) -> io::Result<String> {
        let Some(term) = Self::console() else {
            return Self::read_piped(question);
        };

        term.write_str(question)?;
        Ok(term.read_secure_line()?.trim().to_string())
    }
}
