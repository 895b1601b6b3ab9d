//! spacemap - scan a directory tree and write a depth-bounded size report.
//!
//! Usage:
//!   spacemap                         Scan the home directory, depth 3
//!   spacemap --path DIR --depth N    Scan DIR, keep N levels in the report
//!   spacemap --shortcuts 50          Also link the 50 largest entries
//!   spacemap --help                  Show help

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Context, Result, eyre};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use spacemap_core::DEFAULT_DISPLAY_DEPTH;
use spacemap_report::{ShortcutConfig, ShortcutWriter, largest, render};
use spacemap_scan::{FileTree, RecursiveScanner, ScanConfig, ScanProgress};

/// Number of inaccessible paths listed in the summary.
const INACCESSIBLE_PREVIEW: usize = 10;

#[derive(Parser)]
#[command(
    name = "spacemap",
    version,
    about = "Scan a directory tree and write a JSON size report",
    long_about = "spacemap walks a directory tree, sums the size of every file and \
                  directory, and writes a JSON report truncated at the chosen depth. \
                  Sizes always include everything below that depth."
)]
struct Cli {
    /// Directory to scan (defaults to the home directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Number of levels kept in the report
    #[arg(short, long, default_value_t = DEFAULT_DISPLAY_DEPTH)]
    depth: u32,

    /// Report file, overwritten on every run
    #[arg(short, long, default_value = "disk-report.json")]
    output: PathBuf,

    /// Create shortcuts for the N largest entries (0 disables)
    #[arg(long, value_name = "N", default_value_t = 0)]
    shortcuts: usize,

    /// Directory for shortcuts; cleared before it is populated
    #[arg(long, default_value = "./shortcuts")]
    shortcuts_dir: PathBuf,

    /// Skip entries whose name starts with a dot
    #[arg(long)]
    skip_hidden: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = match cli.path {
        Some(path) => path,
        None => dirs::home_dir().ok_or_else(|| eyre!("Cannot determine home directory; pass --path"))?,
    };

    let config = ScanConfig::builder()
        .root(root)
        .max_display_depth(cli.depth)
        .include_hidden(!cli.skip_hidden)
        .largest_count(cli.shortcuts)
        .build()
        .context("Invalid scan configuration")?;

    let tree = run_scan(&config)?;

    render(&tree)
        .write_to(&cli.output)
        .with_context(|| format!("Cannot write report to {}", cli.output.display()))?;

    print_summary(&tree, &cli.output);

    if cli.shortcuts > 0 {
        run_shortcuts(&tree, cli.shortcuts, cli.shortcuts_dir)?;
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Scan the configured root while a background thread logs progress.
fn run_scan(config: &ScanConfig) -> Result<FileTree> {
    eprintln!(
        "Scanning {} (depth {})...",
        config.root.display(),
        config.max_display_depth
    );

    let scanner = RecursiveScanner::new();
    let logger = spawn_progress_logger(scanner.subscribe());
    let result = scanner.scan(config);

    // Dropping the scanner closes the channel so the logger exits.
    drop(scanner);
    if logger.join().is_err() {
        tracing::warn!("progress logger panicked");
    }

    result.context("Scan failed")
}

fn spawn_progress_logger(
    mut rx: tokio::sync::broadcast::Receiver<ScanProgress>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            match rx.blocking_recv() {
                Ok(progress) if progress.finished => {
                    tracing::info!(
                        files = progress.files_scanned,
                        dirs = progress.dirs_scanned,
                        inaccessible = progress.inaccessible_count,
                        "scan complete in {:.2}s",
                        progress.elapsed.as_secs_f64()
                    );
                }
                Ok(progress) => {
                    tracing::info!(
                        files = progress.files_scanned,
                        dirs = progress.dirs_scanned,
                        size = %format_size(progress.bytes_scanned),
                        files_per_sec = progress.files_per_second() as u64,
                        "scanning {}",
                        progress.current_path.display()
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "progress logger lagging");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Print the end-of-run summary to stderr.
fn print_summary(tree: &FileTree, output: &Path) {
    eprintln!();
    eprintln!("{}", "─".repeat(60));
    eprintln!(
        " {} - {}",
        tree.root_path.display(),
        format_size(tree.total_size())
    );
    eprintln!(
        " {} files, {} directories, {} symlinks",
        tree.stats.total_files, tree.stats.total_dirs, tree.stats.total_symlinks
    );
    if let Some((path, size)) = &tree.stats.largest_file {
        eprintln!(" Largest file: {} ({})", path.display(), format_size(*size));
    }
    eprintln!(" Scanned in {:.2}s", tree.scan_duration.as_secs_f64());
    eprintln!("{}", "─".repeat(60));

    if tree.has_inaccessible() {
        eprintln!();
        eprintln!(
            "{} inaccessible entr{} (counted as 0 bytes)",
            tree.inaccessible.len(),
            if tree.inaccessible.len() == 1 { "y" } else { "ies" }
        );
        for entry in tree.inaccessible.iter().take(INACCESSIBLE_PREVIEW) {
            eprintln!("   {}", entry.message);
        }
        let remaining = tree.inaccessible.len().saturating_sub(INACCESSIBLE_PREVIEW);
        if remaining > 0 {
            eprintln!("   ... and {remaining} more");
        }
    }

    eprintln!();
    eprintln!("Report written to {}", output.display());
}

/// Recreate the shortcut directory for the largest entries.
fn run_shortcuts(tree: &FileTree, count: usize, dir: PathBuf) -> Result<()> {
    let config = ShortcutConfig::builder()
        .output_dir(dir)
        .build()
        .context("Invalid shortcut configuration")?;
    let output_dir = config.output_dir.clone();

    let entries = largest(tree, count).context("Cannot select largest entries")?;
    let summary = ShortcutWriter::with_config(config)
        .write(entries)
        .context("Cannot create shortcuts")?;

    eprintln!(
        "Created {} shortcuts in {}",
        summary.created.len(),
        output_dir.display()
    );
    if !summary.failed.is_empty() {
        eprintln!("{} shortcut(s) could not be created", summary.failed.len());
    }
    Ok(())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
