//! Output formatting for dir2txt snapshots.
//!
//! Provides functions to format a [`Snapshot`] into the plain-text document or JSON.
//! Both formats carry the exact rendered content of every section and the tree.

use crate::reader::NOT_TEXT;
use crate::types::{SectionBody, Snapshot};
use crate::Dir2txtError;
use std::fs;
use std::path::Path;

pub const ARCHIVE_SKIPPED: &str = "`Archive skipped`";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Formats the snapshot into a string.
pub fn format_snapshot(snapshot: &Snapshot, format: OutputFormat) -> Result<String, Dir2txtError> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
    }
}

/// Writes the formatted snapshot to a file, replacing any existing content.
pub fn write_snapshot_to_file(
    snapshot: &Snapshot,
    format: OutputFormat,
    path: impl AsRef<Path>,
) -> Result<(), Dir2txtError> {
    let content = format_snapshot(snapshot, format)?;
    fs::write(&path, content).map_err(|e| Dir2txtError::io(path.as_ref(), e))?;
    Ok(())
}

/// Renders the plain-text document: tree, one fenced block per file, description.
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("Project structure\n\n");
    out.push_str(&snapshot.tree);
    out.push_str("\n\n---\n\n");

    for section in &snapshot.sections {
        out.push_str(&format!("{}\n", section.path.display()));
        match &section.body {
            SectionBody::Text { content } | SectionBody::Archive { content, .. } => {
                out.push_str(&format!("\n```\n{content}\n```\n"));
            }
            SectionBody::ArchiveSkipped { .. } => {
                out.push_str(ARCHIVE_SKIPPED);
                out.push('\n');
            }
            SectionBody::NotText => out.push_str(&format!("\n```\n{NOT_TEXT}\n```\n")),
        }
        out.push_str("---\n\n");
    }

    if let Some(description) = &snapshot.description {
        out.push_str(&format!("Description\n\n{description}\n"));
    }
    out
}
