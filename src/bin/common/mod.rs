use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(name = "impulsedb", no_binary_name = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Set a field of a collection to a value
    Set(Set),
    /// Get the value of a field of a collection
    Get(Get),
    /// Remove a field of a collection
    Rm(Remove),
    /// Print every collection as JSON
    Dump,
}

#[derive(Args, Debug, PartialEq)]
pub struct Set {
    pub collection: String,
    pub field: String,
    pub value: String,
}

#[derive(Args, Debug, PartialEq)]
pub struct Get {
    pub collection: String,
    pub field: String,
}

#[derive(Args, Debug, PartialEq)]
pub struct Remove {
    pub collection: String,
    pub field: String,
}

impl TryFrom<&str> for Command {
    type Error = CommandError;

    fn try_from(line: &str) -> std::result::Result<Self, Self::Error> {
        let tokens = tokenize(line)?;
        Ok(Line::try_parse_from(tokens)?.command)
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unterminated quote")]
    UnterminatedQuote,
    #[error("Dangling escape")]
    DanglingEscape,
    #[error("{0}")]
    Clap(#[from] clap::Error),
}

/// Split a line on whitespace. Double quotes group a token and `\` escapes the
/// next character.
fn tokenize(line: &str) -> std::result::Result<Vec<String>, CommandError> {
    let mut tokens = vec![];
    let mut token = String::new();
    let mut in_token = false;
    let mut quoted = false;

    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                token.push(chars.next().ok_or(CommandError::DanglingEscape)?);
                in_token = true;
            }
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut token));
                    in_token = false;
                }
            }
            c => {
                token.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(token);
    }
    Ok(tokens)
}

/// Values are JSON when they parse as JSON, plain strings otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Parse a `COLLECTION=JSON` pair.
pub fn parse_entry(s: &str) -> std::result::Result<(String, Value), String> {
    let (collection, json) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLLECTION=JSON, got `{}`", s))?;
    let entry = serde_json::from_str(json).map_err(|e| e.to_string())?;
    Ok((collection.to_owned(), entry))
}

/// Strings are printed raw, everything else as JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
