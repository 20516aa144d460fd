//! # CLI Module
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! # Prompt for the source and destination folders
//! photo-organize
//!
//! # Pass them directly
//! photo-organize ~/Pictures ~/Organized
//!
//! # Use every core for hashing and EXIF reads
//! photo-organize ~/Pictures ~/Organized --parallel
//!
//! # JSON report
//! photo-organize ~/Pictures ~/Organized --output json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_organizer::core::organize::OrganizeReport;
use photo_organizer::core::pipeline::Organizer;
use photo_organizer::error::{OrganizerError, Result};
use photo_organizer::events::{Event, EventChannel, OrganizeEvent, PipelineEvent, ScanEvent};
use std::path::{Path, PathBuf};
use std::thread;

/// Photo Organizer - file photos by year, set exact duplicates aside
#[derive(Parser, Debug)]
#[command(name = "photo-organize")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder to read photos from (prompted for when omitted)
    source: Option<PathBuf>,

    /// Folder to organize into (prompted for when omitted)
    destination: Option<PathBuf>,

    /// Hash and read metadata on all CPU cores
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON report for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let term = Term::stderr();

    if matches!(cli.output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Organizer").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let source = match cli.source {
        Some(path) => path,
        None => prompt_path(&term, "Source folder (e.g. /home/user/Pictures): ")?,
    };
    let destination = match cli.destination {
        Some(path) => path,
        None => prompt_path(&term, "Destination folder (e.g. /home/user/Organized): ")?,
    };

    let organizer = Organizer::builder()
        .source(source)
        .destination(destination)
        .parallel(cli.parallel)
        .build();

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(cli.output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose = cli.verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            if let Some((path, message)) = failure_of(&event) {
                let line = failure_line(path, message);
                match progress_clone {
                    Some(ref pb) => pb.println(line),
                    None => eprintln!("{}", line),
                }
                continue;
            }

            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_position(0);
                        pb.set_message(phase.to_string());
                    }
                }
                Event::Scan(ScanEvent::Completed { total_photos }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(total_photos as u64);
                    }
                }
                Event::Organize(OrganizeEvent::Progress(p)) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_position(p.completed as u64);
                        if verbose {
                            pb.set_message(
                                p.current_path
                                    .file_name()
                                    .unwrap_or_default()
                                    .to_string_lossy()
                                    .into_owned(),
                            );
                        }
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    let result = organizer.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let report = result?;

    match cli.output {
        OutputFormat::Pretty => print_pretty_report(&term, &report, cli.verbose),
        OutputFormat::Json => print_json_report(&report)?,
    }

    Ok(())
}

/// Path and detail of a per-file problem, for scan and copy failures alike
fn failure_of(event: &Event) -> Option<(&Path, &str)> {
    match event {
        Event::Scan(ScanEvent::Error { path, message })
        | Event::Organize(OrganizeEvent::FileFailed { path, message }) => {
            Some((path.as_path(), message.as_str()))
        }
        _ => None,
    }
}

fn failure_line(path: &Path, message: &str) -> String {
    format!("{} {}: {}", style("Error").red().bold(), path.display(), message)
}

/// Ask for a folder on the terminal
fn prompt_path(term: &Term, prompt: &str) -> Result<PathBuf> {
    term.write_str(prompt)
        .and_then(|_| term.read_line())
        .map_err(|e| OrganizerError::Config(format!("could not read input: {}", e)))
        .and_then(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                Err(OrganizerError::Config("a folder path is required".to_string()))
            } else {
                Ok(PathBuf::from(trimmed))
            }
        })
}

fn print_pretty_report(term: &Term, report: &OrganizeReport, verbose: bool) {
    term.write_line(&format!("{} Organizing Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} photos found in {:.1}s",
        style(report.total_photos).cyan(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} unique photos",
        style(report.unique_count).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} possible duplicates",
        style(report.duplicate_count).yellow()
    ))
    .ok();

    if !report.failures.is_empty() {
        term.write_line(&format!(
            "  {} photos could not be organized",
            style(report.failures.len()).red()
        ))
        .ok();
    }

    if verbose {
        term.write_line(&format!(
            "  {} dated from EXIF, {} folders created",
            style(report.dated_from_exif).dim(),
            style(report.folders_created).dim()
        ))
        .ok();
    }

    if !report.by_year.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!("{}", style("By Year:").bold().underlined()))
            .ok();
        for summary in &report.by_year {
            term.write_line(&format!(
                "  {}  {} unique, {} duplicates",
                style(summary.year).bold(),
                summary.unique,
                summary.duplicates
            ))
            .ok();
        }
    }

    term.write_line("").ok();

    if report.destination_in_source {
        term.write_line(&format!(
            "{} {} is inside the source folder and was not scanned",
            style("Note").yellow().bold(),
            display_path(&report.destination)
        ))
        .ok();
    }

    match &report.log_error {
        Some(message) => {
            term.write_line(&format!("{} {}", style("Error").red().bold(), message))
                .ok();
        }
        None => {
            term.write_line(&format!(
                "  Log written to {}",
                style(display_path(&report.log_path)).dim()
            ))
            .ok();
        }
    }

    term.write_line(&format!(
        "Done! Check your organized folder at {}",
        style(display_path(&report.destination)).green()
    ))
    .ok();
    term.write_line(&format!(
        "{}",
        style("Remember: No originals were moved or deleted.").dim()
    ))
    .ok();
}

fn print_json_report(report: &OrganizeReport) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).map_err(|e| OrganizerError::Output(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Shorten paths under the home folder to `~/...`
fn display_path(path: &Path) -> String {
    match dirs::home_dir().and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf)) {
        Some(relative) => format!("~/{}", relative.display()),
        None => path.display().to_string(),
    }
}
