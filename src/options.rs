use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Bytes per megabyte used by the large-file threshold.
pub const MEGABYTE: u64 = 1024 * 1024;
pub const DEFAULT_LARGE_FILE_MB: u64 = 10;
pub const DEFAULT_LARGE_FILE_LINES: usize = 1000;

/// How much of a file above the large-file threshold gets read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineLimit {
    /// Do not read the file at all; a placeholder is emitted instead.
    Skip,
    /// Read only the first `n` lines.
    LimitTo(NonZeroUsize),
    /// Read the whole file line by line.
    Unlimited,
}
impl LineLimit {
    /// `Some(0)` skips, `Some(n)` limits, `None` reads everything.
    pub fn from_count(count: Option<usize>) -> Self {
        match count {
            None => LineLimit::Unlimited,
            Some(n) => NonZeroUsize::new(n).map_or(LineLimit::Skip, LineLimit::LimitTo),
        }
    }
}
impl Default for LineLimit {
    fn default() -> Self {
        LineLimit::from_count(Some(DEFAULT_LARGE_FILE_LINES))
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    pub read_archives: bool,
    /// Files strictly larger than this many bytes are "large".
    pub large_file_threshold: u64,
    pub large_file_lines: LineLimit,
}
impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            read_archives: true,
            large_file_threshold: DEFAULT_LARGE_FILE_MB * MEGABYTE,
            large_file_lines: LineLimit::default(),
        }
    }
}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dir2txtOptions {
    pub root: PathBuf,
    pub ignore_patterns: Vec<String>,
    pub exclude_file_name: Option<OsString>,
    pub description: Option<String>,
    pub reader: ReaderConfig,
}
impl Default for Dir2txtOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore_patterns: Vec::new(),
            exclude_file_name: None,
            description: None,
            reader: ReaderConfig::default(),
        }
    }
}
#[derive(Debug, Default)]
pub struct Dir2txtBuilder {
    options: Dir2txtOptions,
}
impl Dir2txtBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: Dir2txtOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn exclude_file_name(mut self, name: Option<OsString>) -> Self {
        self.options.exclude_file_name = name;
        self
    }
    pub fn description(mut self, description: Option<String>) -> Self {
        self.options.description = description;
        self
    }
    pub fn read_archives(mut self, yes: bool) -> Self {
        self.options.reader.read_archives = yes;
        self
    }
    pub fn large_file_threshold(mut self, bytes: u64) -> Self {
        self.options.reader.large_file_threshold = bytes;
        self
    }
    pub fn large_file_threshold_mb(self, megabytes: u64) -> Self {
        self.large_file_threshold(megabytes.saturating_mul(MEGABYTE))
    }
    pub fn large_file_lines(mut self, limit: LineLimit) -> Self {
        self.options.reader.large_file_lines = limit;
        self
    }
    pub fn build(self) -> Dir2txtOptions {
        self.options
    }
}
