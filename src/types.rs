use crate::archive::ArchiveKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What ended up in a file's content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    /// The file read as text, possibly truncated or replaced by a
    /// large-file placeholder.
    Text { content: String },
    /// The expanded listing of an archive.
    Archive { archive: ArchiveKind, content: String },
    /// An archive left unexpanded because archive reading is disabled.
    ArchiveSkipped { archive: ArchiveKind },
    /// Neither text nor a recognized archive.
    NotText,
}

/// One selected file and its rendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub path: PathBuf,
    #[serde(flatten)]
    pub body: SectionBody,
}

/// The assembled document before it is formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// The rendered tree of the selected paths, including its summary line.
    pub tree: String,
    pub directories: usize,
    pub files: usize,
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
