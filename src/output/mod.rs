use anyhow::{Context, Result};
use std::path::Path;

use crate::fetch::Outcome;

pub mod formatters;

pub use formatters::*;

/// Write the transcript lines to `path`, or an empty file when nothing was fetched
pub fn save_to_file(outcome: &Outcome, path: &Path) -> Result<()> {
    let content = match outcome {
        Ok(Some(fetched)) => format_as_text(&fetched.content),
        _ => String::new(),
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }

    fs_err::write(path, content)
        .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
    Ok(())
}

/// Print the JSON envelope as a single stdout line
pub fn print_json(envelope: &JsonEnvelope) -> Result<()> {
    println!("{}", envelope.to_json_line()?);
    Ok(())
}
