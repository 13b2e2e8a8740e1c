//! # dir2txt
//!
//! `dir2txt` concatenates every file under a directory into one text document: a
//! `tree`-style listing of the selected paths, then one fenced block per file, then
//! an optional description.
//!
//! Files above a configurable size threshold are truncated, skipped, or read line by
//! line according to a [`LineLimit`]. Files that are not text are checked for zip,
//! tar, gzip, bzip2 and xz containers whose members are expanded inline.
//!
//! # Features
//!
//! - `logging` (default): emits debug and warning events via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use dir2txt::{Dir2txtBuilder, LineLimit, dir2txt, output};
//!
//! let options = Dir2txtBuilder::new(".")
//!     .ignore_patterns(vec!["target".into(), ".git".into()])
//!     .large_file_threshold_mb(10)
//!     .large_file_lines(LineLimit::from_count(Some(1000)))
//!     .read_archives(true)
//!     .build();
//!
//! let snapshot = dir2txt(options).expect("Failed to scan directory");
//!
//! println!("{}", snapshot.tree);
//! std::fs::write("project.txt", output::render_text(&snapshot)).unwrap();
//! ```

mod archive;
mod engine;
mod error;
mod options;
pub mod output;
mod reader;
mod tree;
mod types;

pub use archive::{ArchiveKind, ArchiveReader, UNREADABLE_MEMBER, UNSUPPORTED_ARCHIVE, inspect_archive};
pub use engine::{apply_ignores, assemble, collect_files, dir2txt, make_document};
pub use error::Dir2txtError;
pub use options::{
    DEFAULT_LARGE_FILE_LINES, DEFAULT_LARGE_FILE_MB, Dir2txtBuilder, Dir2txtOptions, LineLimit,
    MEGABYTE, ReaderConfig,
};
pub use reader::{FileReader, FileText, NOT_TEXT, ReadMode, SKIPPED_PLACEHOLDER};
pub use tree::{PathTree, TreeSummary, paths_as_tree};
pub use types::{Section, SectionBody, Snapshot};
