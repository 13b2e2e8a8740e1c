//! Command-line interface for dir2txt.
//!
//! Walks a directory, concatenates every selected file into one text document,
//! writes it to the output path and prints the tree of what was included.

use clap::{Parser, ValueEnum};
use colored::Colorize;
use dir2txt::output::{self, OutputFormat};
use dir2txt::{DEFAULT_LARGE_FILE_MB, Dir2txtBuilder, Dir2txtOptions, LineLimit, dir2txt};
use std::path::{Path, PathBuf};
use std::process::exit;

/// dir2txt: merge all files of a directory into one text document
#[derive(Parser)]
#[command(name = "dir2txt", version, about, long_about = None)]
struct Cli {
    /// Input directory
    dirname: PathBuf,

    /// Output file
    file: PathBuf,

    /// Comma-separated substrings; paths containing any of them are left out
    #[arg(short, long, value_delimiter = ',')]
    ignore: Vec<String>,

    /// Text appended under a "Description" heading at the end of the output
    #[arg(short, long)]
    description: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Do not expand archive contents
    #[arg(long)]
    no_archives: bool,

    /// Files larger than this many megabytes count as large
    #[arg(long, value_name = "MB", default_value_t = DEFAULT_LARGE_FILE_MB)]
    large_file_mb: u64,

    /// Lines read from a large file: a number (0 skips the file) or "all"
    #[arg(long, value_name = "N|all", default_value = "1000", value_parser = parse_line_limit)]
    max_lines: LineLimit,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Parse a line count or "all" into a LineLimit.
fn parse_line_limit(s: &str) -> Result<LineLimit, String> {
    match s {
        "all" | "unlimited" => Ok(LineLimit::Unlimited),
        _ => s
            .parse::<usize>()
            .map(|n| LineLimit::from_count(Some(n)))
            .map_err(|_| format!("invalid line count: {}", s)),
    }
}

impl Cli {
    fn into_options(self) -> (Dir2txtOptions, PathBuf, OutputFormat, bool) {
        let script_name = std::env::args_os()
            .next()
            .and_then(|arg0| Path::new(&arg0).file_name().map(|name| name.to_os_string()));
        let options = Dir2txtBuilder::new(self.dirname)
            .ignore_patterns(self.ignore)
            .exclude_file_name(script_name)
            .description(self.description)
            .read_archives(!self.no_archives)
            .large_file_threshold_mb(self.large_file_mb)
            .large_file_lines(self.max_lines)
            .build();
        let format = match self.format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        };
        (options, self.file, format, self.verbose)
    }
}

#[cfg(feature = "logging")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let default = if verbose { "dir2txt=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let (options, output_path, format, _verbose) = cli.into_options();

    #[cfg(feature = "logging")]
    init_logging(_verbose);

    let snapshot = match dir2txt(options) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    if let Err(e) = output::write_snapshot_to_file(&snapshot, format, &output_path) {
        eprintln!("Error: {}", e);
        exit(1);
    }

    println!(
        "{} It was written on {}.",
        "+".green(),
        output_path.display().to_string().bright_white().bold()
    );
    println!("{}", snapshot.tree);
}
