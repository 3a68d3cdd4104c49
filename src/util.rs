use anyhow::{Context, Result};
use std::path::Path;

/// Reads a whole file as text, naming the `kind` of file in the error.
pub fn read_file(path: &Path, kind: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Reading {} file `{}`", kind, path.display()))
}
