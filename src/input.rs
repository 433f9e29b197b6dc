use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::demos;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read diff: {0}")]
    Read(#[from] std::io::Error),

    #[error("No diff provided")]
    Empty,

    #[error("Unknown demo: {0} (run `diff-focus demos` to list them)")]
    UnknownDemo(String),
}

/// Where the CLI takes its diff text from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    File(&'a Path),
    Demo(&'a str),
    Stdin,
}

/// Read the diff text for a CLI run. Empty input is a client error and never
/// reaches the classifier.
#[instrument]
pub fn read(source: Source<'_>) -> Result<String, InputError> {
    let text = match source {
        Source::File(path) => std::fs::read_to_string(path)?,
        Source::Demo(key) => demos::find(key)
            .ok_or_else(|| InputError::UnknownDemo(key.to_string()))?
            .diff
            .to_string(),
        Source::Stdin => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };
    require_non_empty(text)
}

fn require_non_empty(text: String) -> Result<String, InputError> {
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    debug!(bytes = text.len(), "read diff");
    Ok(text)
}
