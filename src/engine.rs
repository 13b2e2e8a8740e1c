use crate::archive::{ArchiveReader, inspect_archive};
use crate::error::Dir2txtError;
use crate::options::Dir2txtOptions;
use crate::output::render_text;
use crate::reader::{FileReader, FileText, ReadMode};
use crate::tree::PathTree;
use crate::types::{Section, SectionBody, Snapshot};
use ignore::WalkBuilder;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;
struct Walker {
    inner: ignore::Walk,
    exclude_file_name: Option<OsString>,
}
impl Walker {
    fn new(options: &Dir2txtOptions) -> Result<Self, Dir2txtError> {
        if !options.root.is_dir() {
            return Err(Dir2txtError::InvalidPath(format!(
                "{} is not a directory",
                options.root.display()
            )));
        }
        let mut builder = WalkBuilder::new(&options.root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        Ok(Self {
            inner: builder.build(),
            exclude_file_name: options.exclude_file_name.clone(),
        })
    }
    fn collect_files(self) -> Result<Vec<PathBuf>, Dir2txtError> {
        let Walker {
            inner,
            exclude_file_name,
        } = self;
        let mut files = Vec::new();
        for result in inner {
            let entry = result.map_err(|e| Dir2txtError::Walk(e.to_string()))?;
            let path = entry.path();
            if path.is_file() && !is_excluded(exclude_file_name.as_deref(), path) {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }
}
fn is_excluded(excluded: Option<&OsStr>, path: &Path) -> bool {
    matches!((excluded, path.file_name()), (Some(excluded), Some(name)) if name == excluded)
}

/// Lists every regular file under `options.root` except the excluded file name.
pub fn collect_files(options: &Dir2txtOptions) -> Result<Vec<PathBuf>, Dir2txtError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Walking {}", options.root.display());
    Walker::new(options)?.collect_files()
}

/// Drops every path whose display string contains one of `ignores`.
pub fn apply_ignores(ignores: &[String], paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let ignores: Vec<&str> = ignores
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    if ignores.is_empty() {
        return paths;
    }
    paths
        .into_iter()
        .filter(|path| {
            let shown = path.to_string_lossy();
            !ignores.iter().any(|ignore| shown.contains(ignore))
        })
        .collect()
}

/// Reads every path in order and pairs it with its rendered content.
pub fn assemble(
    paths: &[PathBuf],
    description: Option<&str>,
    reader: &FileReader,
) -> Result<Snapshot, Dir2txtError> {
    let (tree, summary) = PathTree::from_paths(paths).render();
    let mut sections = Vec::with_capacity(paths.len());
    for path in paths {
        let body = match reader.read_file(path, ReadMode::Verbatim)? {
            FileText::Text(content) => SectionBody::Text { content },
            FileText::NotText => match inspect_archive(path) {
                Some(archive) if reader.config().read_archives => SectionBody::Archive {
                    archive,
                    content: ArchiveReader::new(reader).read_archive(path),
                },
                Some(archive) => SectionBody::ArchiveSkipped { archive },
                None => SectionBody::NotText,
            },
        };
        sections.push(Section {
            path: path.clone(),
            body,
        });
    }
    Ok(Snapshot {
        tree,
        directories: summary.directories,
        files: summary.files,
        sections,
        description: description.filter(|d| !d.is_empty()).map(str::to_string),
    })
}

/// Assembles `paths` and formats the result as the plain-text document.
pub fn make_document(
    paths: &[PathBuf],
    description: Option<&str>,
    reader: &FileReader,
) -> Result<String, Dir2txtError> {
    Ok(render_text(&assemble(paths, description, reader)?))
}

/// Walks, filters and assembles according to `options`.
pub fn dir2txt(options: Dir2txtOptions) -> Result<Snapshot, Dir2txtError> {
    let files = collect_files(&options)?;
    #[cfg(feature = "logging")]
    let total = files.len();
    let files = apply_ignores(&options.ignore_patterns, files);
    #[cfg(feature = "logging")]
    tracing::debug!(total, selected = files.len(), "files collected");
    let reader = FileReader::new(options.reader);
    assemble(&files, options.description.as_deref(), &reader)
}
