use std::fs;
use std::path::Path;

use color_eyre::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Removes every C-style `/* ... */` block, non-greedy, newlines included.
pub fn strip_block_comments(raw: &str) -> String {
    BLOCK_COMMENT.replace_all(raw, "").into_owned()
}

pub fn load_backup(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)?;
    let value = serde_json::from_str(&strip_block_comments(&raw))?;
    Ok(value)
}
