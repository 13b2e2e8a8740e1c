//! Archive classification and inline expansion of archive members.
//!
//! Classification sniffs zip and tar containers from their bytes and falls
//! back to the file name suffix for single-stream compressors. Expansion feeds
//! every member back through the [`FileReader`] so the large-file policy
//! applies to archive contents as well.

use crate::error::Dir2txtError;
use crate::reader::{Decoding, FileReader, ReadMode};
use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
#[cfg(feature = "logging")]
use tracing;
use xz2::read::XzDecoder;

pub const UNSUPPORTED_ARCHIVE: &str = "## Unsupported archive format\n";
pub const UNREADABLE_MEMBER: &str = "[Unreadable file]";

const ZIP_SIGNATURES: [&[u8; 4]; 3] = [b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"];
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xfd, b'7', b'z', b'X', b'Z', 0x00];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveKind {
    Zip,
    Tar,
    Gz,
    Bz2,
    Xz,
}
impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::Tar => "tar",
            ArchiveKind::Gz => "gz",
            ArchiveKind::Bz2 => "bz2",
            ArchiveKind::Xz => "xz",
        })
    }
}

/// Classifies `path` as an archive, or `None` if unsupported.
///
/// Zip and tar are detected from content (tar optionally wrapped in gzip,
/// bzip2 or xz). The `.gz`, `.bz2` and `.xz` kinds come from the file name
/// alone, so a renamed non-archive with one of those suffixes still matches.
pub fn inspect_archive(path: &Path) -> Option<ArchiveKind> {
    let kind = if is_zip(path) {
        Some(ArchiveKind::Zip)
    } else if is_tar(path) {
        Some(ArchiveKind::Tar)
    } else {
        let name = path.file_name()?.to_string_lossy();
        if name.ends_with(".gz") {
            Some(ArchiveKind::Gz)
        } else if name.ends_with(".bz2") {
            Some(ArchiveKind::Bz2)
        } else if name.ends_with(".xz") {
            Some(ArchiveKind::Xz)
        } else {
            None
        }
    };
    #[cfg(feature = "logging")]
    tracing::debug!(path = %path.display(), ?kind, "archive inspection");
    kind
}
fn is_zip(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };
    let mut head = [0u8; 4];
    if file.read_exact(&mut head).is_ok() && ZIP_SIGNATURES.iter().any(|sig| **sig == head) {
        return true;
    }
    // Self-extracting archives carry a stub before the first local header.
    file.seek(SeekFrom::Start(0)).is_ok() && zip::ZipArchive::new(file).is_ok()
}
fn is_tar(path: &Path) -> bool {
    let Ok(reader) = open_decompressed(path) else {
        return false;
    };
    let mut archive = tar::Archive::new(reader);
    let Ok(mut entries) = archive.entries() else {
        return false;
    };
    matches!(entries.next(), Some(Ok(_)))
}
/// Opens `path`, transparently unwrapping gzip, bzip2 or xz by magic bytes.
fn open_decompressed(path: &Path) -> io::Result<Box<dyn Read>> {
    let mut file = File::open(path)?;
    let mut head = [0u8; 6];
    let mut filled = 0;
    while filled < head.len() {
        match file.read(&mut head[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    let head = &head[..filled];
    file.seek(SeekFrom::Start(0))?;
    let file = BufReader::new(file);
    Ok(if head.starts_with(GZIP_MAGIC) {
        Box::new(MultiGzDecoder::new(file))
    } else if head.starts_with(BZIP2_MAGIC) {
        Box::new(MultiBzDecoder::new(file))
    } else if head.starts_with(XZ_MAGIC) {
        Box::new(XzDecoder::new(file))
    } else {
        Box::new(file)
    })
}

/// Renders archive contents through a [`FileReader`].
#[derive(Debug, Clone, Copy)]
pub struct ArchiveReader<'a> {
    files: &'a FileReader,
}
impl<'a> ArchiveReader<'a> {
    pub fn new(files: &'a FileReader) -> Self {
        Self { files }
    }

    /// Produces a labelled text block for every member of the archive at `path`.
    ///
    /// Never fails: a broken archive yields an inline
    /// `[Error reading archive: ...]` line and a broken member yields
    /// `[Unreadable file]` for that member only.
    pub fn read_archive(&self, path: &Path) -> String {
        let Some(kind) = inspect_archive(path) else {
            return UNSUPPORTED_ARCHIVE.to_string();
        };
        let mut parts = vec![format!("## Archive content of {} ({kind})", path.display())];
        let result = match kind {
            ArchiveKind::Zip => self.read_zip(path, &mut parts),
            ArchiveKind::Tar => self.read_tar(path, &mut parts),
            ArchiveKind::Gz | ArchiveKind::Bz2 | ArchiveKind::Xz => {
                self.read_stream(path, kind, &mut parts)
            }
        };
        if let Err(e) = result {
            #[cfg(feature = "logging")]
            tracing::warn!(path = %path.display(), error = %e, "archive could not be read");
            parts.push(format!("[Error reading archive: {e}]"));
        }
        parts.join("\n")
    }
    fn read_zip(&self, path: &Path, parts: &mut Vec<String>) -> Result<(), Dir2txtError> {
        let file = File::open(path).map_err(|e| Dir2txtError::io(path, e))?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
        for index in 0..archive.len() {
            let name = archive
                .name_for_index(index)
                .map_or_else(|| format!("#{index}"), str::to_string);
            let content = match archive.by_index(index) {
                Ok(mut entry) => self.render_member(&mut entry),
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!(name = %name, error = %_e, "zip entry could not be opened");
                    None
                }
            };
            parts.push(member_block(path, &name, content));
        }
        Ok(())
    }
    fn read_tar(&self, path: &Path, parts: &mut Vec<String>) -> Result<(), Dir2txtError> {
        let reader = open_decompressed(path).map_err(|e| Dir2txtError::io(path, e))?;
        let mut archive = tar::Archive::new(reader);
        let entries = archive.entries().map_err(|e| Dir2txtError::io(path, e))?;
        for entry in entries {
            let mut entry = entry.map_err(|e| Dir2txtError::io(path, e))?;
            if !entry.header().entry_type().is_file() {
                continue;
            }
            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let content = self.render_member(&mut entry);
            parts.push(member_block(path, &name, content));
        }
        Ok(())
    }
    fn read_stream(
        &self,
        path: &Path,
        kind: ArchiveKind,
        parts: &mut Vec<String>,
    ) -> Result<(), Dir2txtError> {
        let file = BufReader::new(File::open(path).map_err(|e| Dir2txtError::io(path, e))?);
        let decoder: Box<dyn Read> = match kind {
            ArchiveKind::Bz2 => Box::new(MultiBzDecoder::new(file)),
            ArchiveKind::Xz => Box::new(XzDecoder::new(file)),
            _ => Box::new(MultiGzDecoder::new(file)),
        };
        let content = self
            .spool_and_read(decoder)
            .map_err(|e| Dir2txtError::io(path, e))?;
        parts.push(format!("\n## {} (decompressed)\n{content}\n", path.display()));
        Ok(())
    }
    fn render_member<R: Read>(&self, member: R) -> Option<String> {
        match self.spool_and_read(member) {
            Ok(content) => Some(content),
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::warn!(error = %_e, "archive member could not be read");
                None
            }
        }
    }
    /// Buffers a member in a spooled temp file (in memory up to the large-file
    /// threshold, on disk above it) and reads it back under the size policy.
    fn spool_and_read<R: Read>(&self, mut member: R) -> io::Result<String> {
        let limit = usize::try_from(self.files.config().large_file_threshold).unwrap_or(usize::MAX);
        let mut spool = tempfile::spooled_tempfile(limit);
        let len = io::copy(&mut member, &mut spool)?;
        spool.seek(SeekFrom::Start(0))?;
        let text = self
            .files
            .read_source(spool, len, ReadMode::Verbatim, Decoding::Lossy)?;
        Ok(text.into_string())
    }
}
fn member_block(path: &Path, name: &str, content: Option<String>) -> String {
    let content = content.unwrap_or_else(|| UNREADABLE_MEMBER.to_string());
    format!("\n## {} → {name}\n{content}\n", path.display())
}
