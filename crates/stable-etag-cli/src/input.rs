//! Input loading shared by all commands.

use serde_json::Value;
use std::io::{self, Read};

/// Errors raised while loading input JSON.
#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("failed to read file {path}: {source}")]
    File { path: String, source: io::Error },
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads JSON from `input`, or from stdin when no path is given.
pub fn read_json(input: Option<String>) -> Result<Value, InputError> {
    let json_str = if let Some(path) = input {
        std::fs::read_to_string(&path).map_err(|source| InputError::File { path, source })?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    tracing::debug!(len = json_str.len(), "read input JSON");
    Ok(serde_json::from_str(&json_str)?)
}
