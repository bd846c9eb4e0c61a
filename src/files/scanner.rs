//! Token reader shared by every text format in the crate.
//!
//! Files are streams of tokens separated by `:`, `,` or line breaks; blank
//! tokens are skipped, so blank separator lines are optional when reading.
//! Labelled fields read as `label:value`. Paths and matrix rows are read a
//! whole line at a time instead: a path keeps any commas it contains, and a
//! row must hold exactly the expected number of values.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{NetworkError, Result};

fn is_delimiter(c: char) -> bool {
    matches!(c, ':' | ',' | '\n' | '\r')
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Splits at the first character matching `pred`, dropping that character.
/// Every delimiter is ASCII, so it is one byte wide.
fn split_at_first(text: &str, pred: fn(char) -> bool) -> (&str, &str) {
    match text.find(pred) {
        Some(i) => (&text[..i], &text[i + 1..]),
        None => (text, ""),
    }
}

pub struct TokenReader<'a> {
    source_name: String,
    rest: &'a str,
}

impl<'a> TokenReader<'a> {
    pub fn new(source_name: impl Into<String>, text: &'a str) -> TokenReader<'a> {
        TokenReader {
            source_name: source_name.into(),
            rest: text,
        }
    }

    /// Next non-blank piece of text ending at a `pred` character.
    fn next_piece(&mut self, pred: fn(char) -> bool) -> Option<&'a str> {
        while !self.rest.is_empty() {
            let (piece, rest) = split_at_first(self.rest, pred);
            self.rest = rest;
            let piece = piece.trim();
            if !piece.is_empty() {
                return Some(piece);
            }
        }
        None
    }

    pub fn peek(&mut self) -> Option<&'a str> {
        let saved = self.rest;
        let token = self.next_piece(is_delimiter);
        self.rest = saved;
        token
    }

    pub fn token(&mut self) -> Result<&'a str> {
        self.next_piece(is_delimiter)
            .ok_or_else(|| self.malformed("it contains too few arguments"))
    }

    /// The rest of the current line, or the next non-blank line.
    pub fn line(&mut self) -> Result<&'a str> {
        self.next_piece(is_line_break)
            .ok_or_else(|| self.malformed("it contains too few arguments"))
    }

    pub fn value<T: FromStr>(&mut self) -> Result<T> {
        let token = self.token()?;
        self.parse_token(token)
    }

    pub fn values<T: FromStr>(&mut self, count: usize) -> Result<Vec<T>> {
        (0..count).map(|_| self.value()).collect()
    }

    /// One line holding exactly `count` comma-separated values.
    pub fn row<T: FromStr>(&mut self, count: usize) -> Result<Vec<T>> {
        let line = self.line()?;
        let tokens: Vec<&str> = line
            .split(is_delimiter)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.len() != count {
            return Err(self.malformed(format!(
                "the row '{}' holds {} values where {} are expected",
                line,
                tokens.len(),
                count
            )));
        }
        tokens.into_iter().map(|t| self.parse_token(t)).collect()
    }

    /// Fails if anything but blank separators is left.
    pub fn finish(&mut self) -> Result<()> {
        match self.peek() {
            Some(token) => Err(self.malformed(format!(
                "it contains unexpected trailing data ('{}')",
                token
            ))),
            None => Ok(()),
        }
    }

    fn parse_token<T: FromStr>(&self, token: &str) -> Result<T> {
        token.parse().map_err(|_| {
            self.malformed(format!("it contains a mismatched data type ('{}')", token))
        })
    }

    pub fn label(&mut self, expected: &str) -> Result<()> {
        let token = self.token()?;
        if token != expected {
            return Err(self.malformed(format!(
                "expected the label '{}' but found '{}'",
                expected, token
            )));
        }
        Ok(())
    }

    pub fn labeled<T: FromStr>(&mut self, label: &str) -> Result<T> {
        self.label(label)?;
        self.value()
    }

    /// `true`/`false`, any case.
    pub fn labeled_bool(&mut self, label: &str) -> Result<bool> {
        self.label(label)?;
        let token = self.token()?;
        match token.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.malformed(format!(
                "it contains a mismatched data type ('{}' is not a boolean)",
                token
            ))),
        }
    }

    /// Hyphen-joined sizes such as `2-5-5-1`.
    pub fn labeled_sizes(&mut self, label: &str) -> Result<Vec<usize>> {
        self.label(label)?;
        let token = self.token()?;
        token
            .split('-')
            .map(|s| {
                s.trim().parse::<usize>().map_err(|_| {
                    self.malformed(format!(
                        "it contains a mismatched data type ('{}' is not a list of layer sizes)",
                        token
                    ))
                })
            })
            .collect()
    }

    /// A path running to the end of its line, resolved against `base` when relative.
    pub fn labeled_path(&mut self, label: &str, base: &Path) -> Result<PathBuf> {
        self.label(label)?;
        Ok(resolve(base, self.line()?))
    }

    pub fn malformed(&self, reason: impl Into<String>) -> NetworkError {
        NetworkError::malformed(self.source_name.clone(), reason)
    }
}

/// Joins a relative path onto `base`; absolute paths pass through.
pub fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Directory relative paths inside `file` are resolved against.
pub fn base_dir(file: &Path) -> PathBuf {
    file.parent().map(Path::to_path_buf).unwrap_or_default()
}
