//! Source formatting, the one async step of page generation.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Language of a source string handed to a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    Tsx,
    TypeScript,
    Css,
    Json,
}

impl SourceLanguage {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Tsx => "tsx",
            Self::TypeScript => "ts",
            Self::Css => "css",
            Self::Json => "json",
        }
    }
}

/// Formatter failures, surfaced unchanged to page generation callers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The source does not parse.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// The formatter itself failed.
    #[error("formatter failed: {0}")]
    Failed(String),

    /// The formatter did not finish in time.
    #[error("formatter timed out after {0:?}")]
    TimedOut(Duration),
}

/// Pretty-printer for generated source.
#[async_trait]
pub trait SourceFormatter: Send + Sync {
    async fn format(&self, source: &str, language: SourceLanguage) -> Result<String, FormatError>;
}

/// Deterministic built-in formatter.
///
/// Strips trailing whitespace, drops leading and trailing blank lines,
/// collapses runs of blank lines to one and ends the output with a single
/// newline. Rejects sources whose curly braces do not balance; string
/// literals and comments are skipped when counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct TidyFormatter;

impl TidyFormatter {
    pub fn tidy(source: &str) -> Result<String, FormatError> {
        check_braces(source)?;

        let mut out = String::with_capacity(source.len());
        let mut blank_run = false;
        for line in source.lines().map(str::trim_end) {
            if line.is_empty() {
                blank_run = !out.is_empty();
                continue;
            }
            if blank_run {
                out.push('\n');
                blank_run = false;
            }
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }
}

#[async_trait]
impl SourceFormatter for TidyFormatter {
    async fn format(&self, source: &str, language: SourceLanguage) -> Result<String, FormatError> {
        tracing::trace!(language = language.extension(), bytes = source.len(), "tidying source");
        Self::tidy(source)
    }
}

enum Scan {
    Code,
    Quoted(char),
    LineComment,
    BlockComment,
}

fn check_braces(source: &str) -> Result<(), FormatError> {
    let mut open: Vec<usize> = Vec::new();
    let mut state = Scan::Code;
    let mut line = 1;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        state = match state {
            Scan::Code => match c {
                '"' | '\'' | '`' => Scan::Quoted(c),
                '/' if chars.peek() == Some(&'/') => Scan::LineComment,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    Scan::BlockComment
                }
                '{' => {
                    open.push(line);
                    Scan::Code
                }
                '}' => {
                    if open.pop().is_none() {
                        return Err(FormatError::Syntax {
                            line,
                            message: "unexpected '}'".to_string(),
                        });
                    }
                    Scan::Code
                }
                _ => Scan::Code,
            },
            Scan::Quoted(quote) => match c {
                '\\' => {
                    if chars.next() == Some('\n') {
                        line += 1;
                    }
                    Scan::Quoted(quote)
                }
                '\n' if quote != '`' => Scan::Code,
                c if c == quote => Scan::Code,
                _ => Scan::Quoted(quote),
            },
            Scan::LineComment if c == '\n' => Scan::Code,
            Scan::LineComment => Scan::LineComment,
            Scan::BlockComment if c == '*' && chars.peek() == Some(&'/') => {
                chars.next();
                Scan::Code
            }
            Scan::BlockComment => Scan::BlockComment,
        };
    }

    match open.pop() {
        Some(line) => Err(FormatError::Syntax {
            line,
            message: "unclosed '{'".to_string(),
        }),
        None => Ok(()),
    }
}
