//! Size-aware text reading for files on disk and decompressed archive members.

use crate::error::Dir2txtError;
use crate::options::{LineLimit, ReaderConfig};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
#[cfg(feature = "logging")]
use tracing;

/// Rendered in place of content that is not text and not an archive.
pub const NOT_TEXT: &str = "Not a text file";
/// Returned for large files when the line policy is [`LineLimit::Skip`].
pub const SKIPPED_PLACEHOLDER: &str = "The file could not be read.\n";

const SNIFF_LEN: usize = 8192;

/// Outcome of reading a file as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileText {
    Text(String),
    NotText,
}
impl FileText {
    /// The text, or [`NOT_TEXT`].
    pub fn into_string(self) -> String {
        match self {
            FileText::Text(text) => text,
            FileText::NotText => NOT_TEXT.to_string(),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Content exactly as stored.
    #[default]
    Verbatim,
    /// Each line right-trimmed, rejoined with `\n`.
    Lines,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decoding {
    /// Invalid UTF-8 or binary content yields [`FileText::NotText`].
    Strict,
    /// Invalid sequences are replaced with U+FFFD.
    Lossy,
}
#[derive(Debug, Clone, Default)]
pub struct FileReader {
    config: ReaderConfig,
}
impl FileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
    pub fn is_large(&self, len: u64) -> bool {
        len > self.config.large_file_threshold
    }

    /// Reads `path` under the configured large-file policy.
    ///
    /// Missing files and permission problems are errors; content that does not
    /// decode as text is reported as [`FileText::NotText`].
    pub fn read_file(&self, path: &Path, mode: ReadMode) -> Result<FileText, Dir2txtError> {
        let file = File::open(path).map_err(|e| Dir2txtError::io(path, e))?;
        let len = file
            .metadata()
            .map_err(|e| Dir2txtError::io(path, e))?
            .len();
        self.read_source(file, len, mode, Decoding::Strict)
            .map_err(|e| Dir2txtError::io(path, e))
    }

    pub(crate) fn read_source<R: Read>(
        &self,
        source: R,
        len: u64,
        mode: ReadMode,
        decoding: Decoding,
    ) -> io::Result<FileText> {
        if self.is_large(len) && self.config.large_file_lines == LineLimit::Skip {
            #[cfg(feature = "logging")]
            tracing::debug!(len, "large file skipped by line policy");
            return Ok(FileText::Text(SKIPPED_PLACEHOLDER.to_string()));
        }
        let mut reader = BufReader::with_capacity(SNIFF_LEN, source);
        if decoding == Decoding::Strict {
            let head = reader.fill_buf()?;
            if content_inspector::inspect(head).is_binary() {
                return Ok(FileText::NotText);
            }
        }
        if self.is_large(len) {
            return match self.config.large_file_lines {
                LineLimit::LimitTo(n) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!(len, lines = n.get(), "large file truncated");
                    let text = read_lines(&mut reader, Some(n.get()), decoding)?;
                    Ok(text.map_or(FileText::NotText, |lines| {
                        FileText::Text(format!(
                            "{lines}\n...\nThere are only {n} lines of the file."
                        ))
                    }))
                }
                LineLimit::Unlimited => Ok(read_lines(&mut reader, None, decoding)?
                    .map_or(FileText::NotText, FileText::Text)),
                LineLimit::Skip => Ok(FileText::Text(SKIPPED_PLACEHOLDER.to_string())),
            };
        }
        let mut bytes = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
        reader.read_to_end(&mut bytes)?;
        let Some(text) = decode(bytes, decoding) else {
            return Ok(FileText::NotText);
        };
        Ok(FileText::Text(match mode {
            ReadMode::Verbatim => text,
            ReadMode::Lines => text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n"),
        }))
    }
}
fn decode(bytes: Vec<u8>, decoding: Decoding) -> Option<String> {
    match decoding {
        Decoding::Strict => String::from_utf8(bytes).ok(),
        Decoding::Lossy => Some(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }),
    }
}
/// Reads up to `limit` lines, right-trimmed and joined with `\n`.
/// `None` means a line failed strict decoding.
fn read_lines<R: BufRead>(
    reader: &mut R,
    limit: Option<usize>,
    decoding: Decoding,
) -> io::Result<Option<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    while limit.is_none_or(|n| lines.len() < n) {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let Some(line) = decode(std::mem::take(&mut buf), decoding) else {
            return Ok(None);
        };
        lines.push(line.trim_end().to_string());
    }
    Ok(Some(lines.join("\n")))
}
