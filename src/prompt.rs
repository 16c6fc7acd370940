//! Interactive console prompts
//!
//! Asks for the operation, the input path, the output path and the key,
//! repeating a question until the answer is usable. End of input is an
//! error rather than another round of prompting.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::error::{CaesarboxError, ErrorCategory, ErrorKind, Result};
use crate::operation::Operation;

/// Trait for reading answers one line at a time
pub trait LineReader {
    /// Read the next line without its line terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Returns canned answers in order (for testing)
pub struct ConstantLineReader {
    lines: VecDeque<String>,
}

impl ConstantLineReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineReader for ConstantLineReader {
    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Reads lines from any buffered source, such as a locked stdin
pub struct ReaderLineReader {
    reader: Box<dyn BufRead>,
}

impl ReaderLineReader {
    pub fn new(reader: Box<dyn BufRead>) -> Self {
        Self { reader }
    }

    /// Reads answers from standard input.
    pub fn stdin() -> Self {
        Self::new(Box::new(io::stdin().lock()))
    }
}

impl LineReader for ReaderLineReader {
    fn read_line(&mut self) -> Result<Option<String>> {
        read_one_line(&mut self.reader)
    }
}

fn read_one_line(reader: &mut dyn BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line).map_err(|e| {
        CaesarboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            format!("error reading answer: {}", e),
            e,
        )
    })?;
    if n == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Everything needed to run one transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub operation: Operation,
    pub input: PathBuf,
    pub output: PathBuf,
    pub key: i32,
}

/// Asks questions on `out` and reads the answers from a `LineReader`.
pub struct Prompter<'a> {
    reader: &'a mut dyn LineReader,
    out: &'a mut dyn Write,
}

impl<'a> Prompter<'a> {
    pub fn new(reader: &'a mut dyn LineReader, out: &'a mut dyn Write) -> Self {
        Self { reader, out }
    }

    pub fn operation(&mut self) -> Result<Operation> {
        self.ask("Operation (encrypt/decrypt): ", "operation", |answer| answer.parse())
    }

    pub fn input_path(&mut self) -> Result<PathBuf> {
        self.ask("Input file: ", "input file", parse_path)
    }

    pub fn output_path(&mut self) -> Result<PathBuf> {
        self.ask("Output file: ", "output file", parse_path)
    }

    pub fn key(&mut self) -> Result<i32> {
        self.ask("Key: ", "key", parse_key)
    }

    /// Ask for operation, input path, output path and key, in that order.
    pub fn request(&mut self) -> Result<Request> {
        let operation = self.operation()?;
        let input = self.input_path()?;
        let output = self.output_path()?;
        let key = self.key()?;
        Ok(Request {
            operation,
            input,
            output,
            key,
        })
    }

    fn ask<T>(&mut self, prompt: &str, what: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
        loop {
            self.write(prompt)?;
            let line = self.reader.read_line()?.ok_or_else(|| {
                CaesarboxError::with_kind(
                    ErrorCategory::User,
                    ErrorKind::PromptUnavailable,
                    format!("input ended before {} was given", what),
                )
            })?;
            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => self.write(&format!("{}\n", e.message()))?,
            }
        }
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| {
                CaesarboxError::with_kind_and_source(
                    ErrorCategory::Internal,
                    ErrorKind::Io,
                    format!("failed to write prompt: {}", e),
                    e,
                )
            })
    }
}

fn parse_path(answer: &str) -> Result<PathBuf> {
    if answer.is_empty() {
        return Err(CaesarboxError::with_kind(
            ErrorCategory::User,
            ErrorKind::InvalidPath,
            "a file path is required",
        ));
    }
    Ok(PathBuf::from(answer))
}

/// Parse a shift key; any `i32` is accepted.
pub fn parse_key(answer: &str) -> Result<i32> {
    answer.trim().parse::<i32>().map_err(|e| {
        CaesarboxError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::InvalidKey,
            format!("key must be an integer, got '{}'", answer.trim()),
            e,
        )
    })
}
