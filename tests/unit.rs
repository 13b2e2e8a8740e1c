use dir2txt::{
    ArchiveKind, ArchiveReader, FileReader, FileText, LineLimit, PathTree, ReadMode, ReaderConfig,
    SKIPPED_PLACEHOLDER, UNSUPPORTED_ARCHIVE, apply_ignores, inspect_archive, paths_as_tree,
};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
fn reader(threshold: u64, lines: Option<usize>) -> FileReader {
    FileReader::new(ReaderConfig {
        read_archives: true,
        large_file_threshold: threshold,
        large_file_lines: LineLimit::from_count(lines),
    })
}
fn text(result: FileText) -> String {
    match result {
        FileText::Text(text) => text,
        FileText::NotText => panic!("expected text"),
    }
}
fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
fn tar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, name, *data).unwrap();
    }
    builder.into_inner().unwrap()
}
fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn test_small_file_read_verbatim() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "a.txt", b"hello  \nworld\n");
    let result = reader(1024, Some(5)).read_file(&path, ReadMode::Verbatim).unwrap();
    assert_eq!(text(result), "hello  \nworld\n");
}
#[test]
fn test_line_mode_trims_trailing_whitespace() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "a.txt", b"  indented  \nnext\t\r\nlast");
    let result = reader(1024, Some(5)).read_file(&path, ReadMode::Lines).unwrap();
    assert_eq!(text(result), "  indented\nnext\nlast");
}
#[test]
fn test_threshold_is_strictly_greater_than() {
    let dir = tempdir().unwrap();
    let at = write(dir.path(), "at.txt", &[b'a'; 1024]);
    let over = write(dir.path(), "over.txt", &[b'a'; 1025]);
    let files = reader(1024, Some(0));
    assert_eq!(
        text(files.read_file(&at, ReadMode::Verbatim).unwrap()),
        "a".repeat(1024)
    );
    assert_eq!(
        text(files.read_file(&over, ReadMode::Verbatim).unwrap()),
        SKIPPED_PLACEHOLDER
    );
}
#[test]
fn test_large_file_limited_to_first_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.txt");
    let mut f = File::create(&path).unwrap();
    for i in 0..100 {
        writeln!(f, "line {}   ", i).unwrap();
    }
    drop(f);
    let result = reader(100, Some(5)).read_file(&path, ReadMode::Verbatim).unwrap();
    assert_eq!(
        text(result),
        "line 0\nline 1\nline 2\nline 3\nline 4\n...\nThere are only 5 lines of the file."
    );
}
#[test]
fn test_large_file_skipped() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "big.txt", "secret content\n".repeat(100).as_bytes());
    let result = text(reader(100, Some(0)).read_file(&path, ReadMode::Verbatim).unwrap());
    assert_eq!(result, "The file could not be read.\n");
    assert!(!result.contains("secret"));
}
#[test]
fn test_large_file_unlimited_reads_every_line() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "big.txt", "row  \n".repeat(50).as_bytes());
    let result = text(reader(100, None).read_file(&path, ReadMode::Verbatim).unwrap());
    assert_eq!(result.lines().count(), 50);
    assert!(result.lines().all(|line| line == "row"));
}
#[test]
fn test_binary_and_invalid_utf8_are_not_text() {
    let dir = tempdir().unwrap();
    let binary = write(dir.path(), "bin.dat", &[0, 1, 2, 3]);
    let latin1 = write(dir.path(), "latin1.txt", b"caf\xe9 au lait");
    let files = reader(1024, Some(5));
    assert_eq!(
        files.read_file(&binary, ReadMode::Verbatim).unwrap(),
        FileText::NotText
    );
    assert_eq!(
        files.read_file(&latin1, ReadMode::Verbatim).unwrap(),
        FileText::NotText
    );
}
#[test]
fn test_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let result = reader(1024, Some(5)).read_file(&dir.path().join("nope.txt"), ReadMode::Verbatim);
    assert!(matches!(result, Err(dir2txt::Dir2txtError::Io { .. })));
}
#[test]
fn test_line_limit_from_count() {
    assert_eq!(LineLimit::from_count(Some(0)), LineLimit::Skip);
    assert_eq!(LineLimit::from_count(None), LineLimit::Unlimited);
    assert!(matches!(LineLimit::from_count(Some(3)), LineLimit::LimitTo(n) if n.get() == 3));
}
#[test]
fn test_tree_rendering() {
    let tree = paths_as_tree(&["a/b.txt", "a/c.txt", "d.txt"]);
    assert_eq!(
        tree,
        ". Files that were selected:\n|\n├── a/\n│   ├── b.txt\n│   └── c.txt\n└── d.txt\n\n1 directories, 3 files"
    );
}
#[test]
fn test_tree_sorts_siblings_and_nests_prefixes() {
    let tree = paths_as_tree(&["z/y/x.rs", "b.rs", "z/a.rs"]);
    assert_eq!(
        tree,
        ". Files that were selected:\n|\n├── b.rs\n└── z/\n    ├── a.rs\n    └── y/\n        └── x.rs\n\n2 directories, 3 files"
    );
}
#[test]
fn test_tree_empty() {
    let tree = paths_as_tree::<&str>(&[]);
    assert_eq!(tree, ". Files that were selected:\n|\n\n0 directories, 0 files");
}
#[test]
fn test_tree_leaf_and_directory_conflict_resolves_to_directory() {
    let (tree, summary) = PathTree::from_paths(["a", "a/b"]).render();
    assert_eq!(summary.directories, 1);
    assert_eq!(summary.files, 1);
    assert!(tree.contains("└── a/\n    └── b"));
    let (reversed, _) = PathTree::from_paths(["a/b", "a"]).render();
    assert_eq!(tree, reversed);
}
#[test]
fn test_tree_skips_current_dir_components() {
    let (_, summary) = PathTree::from_paths(["./src/main.rs", "src/lib.rs"]).render();
    assert_eq!(summary.directories, 1);
    assert_eq!(summary.files, 2);
}
#[test]
fn test_apply_ignores_substring() {
    let paths = vec![PathBuf::from("src/test_util.go"), PathBuf::from("src/main.go")];
    let filtered = apply_ignores(&["test".to_string()], paths);
    assert_eq!(filtered, vec![PathBuf::from("src/main.go")]);
}
#[test]
fn test_apply_ignores_drops_empty_patterns() {
    let paths = vec![PathBuf::from("a.txt"), PathBuf::from("b.log")];
    let filtered = apply_ignores(&["".to_string(), ".log".to_string()], paths);
    assert_eq!(filtered, vec![PathBuf::from("a.txt")]);
}
#[test]
fn test_inspect_archive_by_content() {
    let dir = tempdir().unwrap();
    let zip = write(dir.path(), "bundle.dat", &zip_bytes(&[("a.txt", b"alpha")]));
    let tar = write(dir.path(), "bundle.tar", &tar_bytes(&[("a.txt", b"alpha")]));
    let tgz = write(dir.path(), "bundle.tgz", &gzip(&tar_bytes(&[("a.txt", b"alpha")])));
    assert_eq!(inspect_archive(&zip), Some(ArchiveKind::Zip));
    assert_eq!(inspect_archive(&tar), Some(ArchiveKind::Tar));
    assert_eq!(inspect_archive(&tgz), Some(ArchiveKind::Tar));
}
#[test]
fn test_inspect_archive_by_suffix() {
    let dir = tempdir().unwrap();
    let gz = write(dir.path(), "notes.txt.gz", &gzip(b"hello"));
    let fake = write(dir.path(), "fake.bz2", b"not compressed at all");
    let xz = write(dir.path(), "data.xz", &[0xfd, b'7', b'z', b'X', b'Z', 0]);
    let blob = write(dir.path(), "blob.bin", &[0, 1, 2, 3]);
    assert_eq!(inspect_archive(&gz), Some(ArchiveKind::Gz));
    assert_eq!(inspect_archive(&fake), Some(ArchiveKind::Bz2));
    assert_eq!(inspect_archive(&xz), Some(ArchiveKind::Xz));
    assert_eq!(inspect_archive(&blob), None);
}
#[test]
fn test_read_zip_archive() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "bundle.zip",
        &zip_bytes(&[("a.txt", b"alpha"), ("docs/b.md", b"beta")]),
    );
    let files = reader(1024, Some(5));
    let out = ArchiveReader::new(&files).read_archive(&path);
    let shown = path.display();
    assert!(out.starts_with(&format!("## Archive content of {} (zip)", shown)));
    assert!(out.contains(&format!("\n## {} → a.txt\nalpha\n", shown)));
    assert!(out.contains(&format!("\n## {} → docs/b.md\nbeta\n", shown)));
}
#[test]
fn test_read_zip_bzip2_entries() {
    let dir = tempdir().unwrap();
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let bzip2 = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Bzip2);
    writer.start_file("packed.txt", bzip2).unwrap();
    writer.write_all(b"bzip2 member").unwrap();
    let stored = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    writer.start_file("plain.txt", stored).unwrap();
    writer.write_all(b"stored member").unwrap();
    let path = write(dir.path(), "mixed.zip", &writer.finish().unwrap().into_inner());
    let files = reader(1024, Some(5));
    let out = ArchiveReader::new(&files).read_archive(&path);
    assert!(out.contains("→ packed.txt\nbzip2 member\n"), "{}", out);
    assert!(out.contains("→ plain.txt\nstored member\n"), "{}", out);
}
#[test]
fn test_unreadable_zip_entry_keeps_its_name() {
    fn find(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).position(|w| w == needle).unwrap()
    }
    let dir = tempdir().unwrap();
    let mut bytes = zip_bytes(&[
        ("odd.txt", b"odd method"),
        ("bad.txt", b"AAAAAAAAAAAA"),
        ("good.txt", b"still here"),
    ]);
    // Unknown compression method for the first entry, in both headers.
    let local = find(&bytes, b"PK\x03\x04") + 8;
    bytes[local..local + 2].copy_from_slice(&97u16.to_le_bytes());
    let central = find(&bytes, b"PK\x01\x02") + 10;
    bytes[central..central + 2].copy_from_slice(&97u16.to_le_bytes());
    // Payload no longer matches the stored CRC.
    let payload = find(&bytes, b"AAAAAAAAAAAA");
    bytes[payload..payload + 12].copy_from_slice(b"BBBBBBBBBBBB");
    let path = write(dir.path(), "damaged.zip", &bytes);
    let files = reader(1024, Some(5));
    let out = ArchiveReader::new(&files).read_archive(&path);
    assert!(out.contains("→ odd.txt\n[Unreadable file]\n"), "{}", out);
    assert!(out.contains("→ bad.txt\n[Unreadable file]\n"), "{}", out);
    assert!(out.contains("→ good.txt\nstill here\n"), "{}", out);
    assert!(!out.contains("[Error reading archive: "), "{}", out);
}
#[test]
fn test_read_tar_lists_regular_files_only() {
    let dir = tempdir().unwrap();
    let mut builder = tar::Builder::new(Vec::new());
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Directory);
    header.set_size(0);
    header.set_mode(0o755);
    builder.append_data(&mut header, "docs/", std::io::empty()).unwrap();
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_size(5);
    header.set_mode(0o644);
    builder.append_data(&mut header, "docs/a.txt", &b"alpha"[..]).unwrap();
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Symlink);
    header.set_size(0);
    header.set_mode(0o777);
    builder.append_link(&mut header, "link.txt", "docs/a.txt").unwrap();
    let path = write(dir.path(), "tree.tar", &builder.into_inner().unwrap());
    let files = reader(1024, Some(5));
    let out = ArchiveReader::new(&files).read_archive(&path);
    assert!(out.contains("→ docs/a.txt\nalpha\n"), "{}", out);
    assert!(!out.contains("→ docs/\n"), "{}", out);
    assert!(!out.contains("link.txt"), "{}", out);
    assert_eq!(out.matches(" → ").count(), 1, "{}", out);
}
#[test]
fn test_read_tar_applies_large_file_policy_to_members() {
    let dir = tempdir().unwrap();
    let big = "member line\n".repeat(40);
    let path = write(
        dir.path(),
        "logs.tar.gz",
        &gzip(&tar_bytes(&[("small.txt", b"tiny"), ("big.log", big.as_bytes())])),
    );
    let files = reader(100, Some(2));
    let out = ArchiveReader::new(&files).read_archive(&path);
    assert!(out.contains("(tar)"));
    assert!(out.contains("→ small.txt\ntiny\n"));
    assert!(out.contains("→ big.log\nmember line\nmember line\n...\nThere are only 2 lines of the file.\n"));
}
#[test]
fn test_read_single_stream_archives() {
    let dir = tempdir().unwrap();
    let gz = write(dir.path(), "notes.txt.gz", &gzip(b"gzipped notes"));
    let mut bz = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    bz.write_all(b"bzipped notes").unwrap();
    let bz = write(dir.path(), "notes.txt.bz2", &bz.finish().unwrap());
    let mut xz = xz2::write::XzEncoder::new(Vec::new(), 6);
    xz.write_all(b"xzipped notes").unwrap();
    let xz = write(dir.path(), "notes.txt.xz", &xz.finish().unwrap());
    let files = reader(1024, Some(5));
    let archives = ArchiveReader::new(&files);
    for (path, kind, body) in [
        (&gz, "gz", "gzipped notes"),
        (&bz, "bz2", "bzipped notes"),
        (&xz, "xz", "xzipped notes"),
    ] {
        let out = archives.read_archive(path);
        assert!(out.contains(&format!("({})", kind)), "{}", out);
        assert!(
            out.contains(&format!("\n## {} (decompressed)\n{}\n", path.display(), body)),
            "{}",
            out
        );
    }
}
#[test]
fn test_corrupt_archives_render_inline_errors() {
    let dir = tempdir().unwrap();
    let full = zip_bytes(&[("a.txt", "alpha ".repeat(200).as_bytes())]);
    let truncated = write(dir.path(), "broken.zip", &full[..full.len() / 2]);
    let bad_gz = write(dir.path(), "broken.gz", &[0, 1, 2, 3, 4, 5, 6, 7]);
    let files = reader(1024, Some(5));
    let archives = ArchiveReader::new(&files);
    assert!(archives.read_archive(&truncated).contains("[Error reading archive: "));
    assert!(archives.read_archive(&bad_gz).contains("[Error reading archive: "));
}
#[test]
fn test_unsupported_archive() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "image.png", &[0x89, b'P', b'N', b'G', 0, 0, 0, 0]);
    let files = reader(1024, Some(5));
    assert_eq!(ArchiveReader::new(&files).read_archive(&path), UNSUPPORTED_ARCHIVE);
}
