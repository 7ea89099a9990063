//! CLI entrypoint: bounded string demo and banned-call scanner.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, error, info};
use securec_helpers::barrier::{BANNED, Violation, scan_source};
use securec_helpers::{bounded_copy, bounded_format, bounded_read_line, content};

/// Extensions checked when a directory is given to `scan`.
const SCANNED_EXTENSIONS: &[&str] = &["rs", "c", "h"];

/// Bounded string helpers and the unsafe-call barrier.
#[derive(Debug, Parser)]
#[command(name = "securec")]
#[command(about = "Bounded string operations and a scanner for banned unbounded calls")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Copy, read a name from stdin, and format a greeting into fixed buffers.
    Demo(DemoArgs),
    /// Report call-shaped uses of banned functions; exits 1 if any are found.
    Scan {
        /// Files or directories (searched for .rs, .c and .h files).
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List the banned calls and their bounded replacements.
    Banned,
}

#[derive(Debug, Args)]
struct DemoArgs {
    /// Text copied into the first buffer.
    #[arg(long, default_value = "Ayushman")]
    source: String,
    /// Capacity of the copy buffer, terminator included.
    #[arg(long, default_value_t = 20)]
    copy_capacity: usize,
    /// Capacity of the name buffer, terminator included.
    #[arg(long, default_value_t = 20)]
    input_capacity: usize,
    /// Capacity of the greeting buffer, terminator included.
    #[arg(long, default_value_t = 30)]
    format_capacity: usize,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG=debug (or trace) shows scan progress and truncation events
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match cli.command {
        Command::Demo(args) => run_demo(&args).map(|()| ExitCode::SUCCESS),
        Command::Scan { paths } => run_scan(&paths),
        Command::Banned => {
            for call in &BANNED {
                println!("{:<8} -> {:<18} {}", call.name, call.alternative, call.reason);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn truncation_note(truncated: bool) -> &'static str {
    if truncated { " (truncated)" } else { "" }
}

fn run_demo(args: &DemoArgs) -> Result<()> {
    let mut dest = vec![0u8; args.copy_capacity];
    let copied = bounded_copy(&mut dest, args.source.as_bytes(), args.copy_capacity)
        .context("copy buffer")?;
    println!(
        "Safe copy: {}{}",
        String::from_utf8_lossy(content(&dest)),
        truncation_note(copied.truncated)
    );

    print!("Enter your name: ");
    io::stdout().flush().context("flushing prompt")?;
    let mut input = vec![0u8; args.input_capacity];
    let line = bounded_read_line(&mut input, args.input_capacity).context("name buffer")?;
    if line.end_of_input && line.len == 0 {
        info!("no input available, continuing with an empty name");
    }
    let name = String::from_utf8_lossy(content(&input)).into_owned();
    println!("Welcome, {name}!{}", truncation_note(line.truncated));

    let mut buffer = vec![0u8; args.format_capacity];
    let formatted = bounded_format!(&mut buffer, args.format_capacity, "Hi {name}")
        .context("greeting buffer")?;
    println!(
        "Output: {}{}",
        String::from_utf8_lossy(content(&buffer)),
        truncation_note(formatted.truncated)
    );
    Ok(())
}

fn collect_sources(
    path: &Path,
    out: &mut Vec<PathBuf>,
) -> Result<()> {
    let meta = fs::metadata(path).with_context(|| format!("reading {}", path.display()))?;
    if !meta.is_dir() {
        out.push(path.to_path_buf());
        return Ok(());
    }
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("listing {}", path.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("listing {}", path.display()))?;
    entries.sort_by_key(|entry| entry.path());
    for entry in entries {
        let child = entry.path();
        if child.is_dir() {
            collect_sources(&child, out)?;
        } else if child
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SCANNED_EXTENSIONS.contains(&ext))
        {
            out.push(child);
        }
    }
    Ok(())
}

fn run_scan(paths: &[PathBuf]) -> Result<ExitCode> {
    let mut files = Vec::new();
    for path in paths {
        collect_sources(path, &mut files)?;
    }

    let mut total = 0;
    for file in &files {
        let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
        let found: Vec<Violation> = scan_source(&text);
        debug!("{}: {} banned call(s)", file.display(), found.len());
        for violation in &found {
            println!("{}:{violation}", file.display());
        }
        total += found.len();
    }

    if total > 0 {
        error!("{total} banned call(s) in {} file(s) scanned", files.len());
        return Ok(ExitCode::FAILURE);
    }
    info!("no banned calls in {} file(s)", files.len());
    Ok(ExitCode::SUCCESS)
}
