//! Organize run implementation.

use crate::core::metadata::{ClassificationYear, YearSource};
use crate::core::organize::{
    Analysis, Bucket, Classifier, FileFailure, LogEntry, OrganizeExecutor, OrganizeJournal,
    OrganizeReport, YearSummary, LOG_FILE_NAME,
};
use crate::core::scanner::{ImageFile, ImageScanner, ScanConfig, WalkDirScanner};
use crate::error::OrganizerError;
use crate::events::{
    null_sender, Event, EventSender, OrganizeEvent, OrganizeProgress, PipelineEvent,
    PipelinePhase, PipelineSummary,
};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Configuration for an organize run
#[derive(Debug, Clone)]
pub struct OrganizerConfig {
    /// Folder to read photos from
    pub source: PathBuf,
    /// Folder that receives `Photos/`, `PossibleDuplicates/` and the log
    pub destination: PathBuf,
    /// Analyze files on the rayon pool
    pub parallel: bool,
    /// Scanner configuration
    pub scan_config: ScanConfig,
    /// Log file name inside the destination
    pub log_file_name: String,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            parallel: false,
            scan_config: ScanConfig::default(),
            log_file_name: LOG_FILE_NAME.to_string(),
        }
    }
}

/// Builder for organizer configuration
#[derive(Default)]
pub struct OrganizerBuilder {
    config: OrganizerConfig,
    scanner: Option<Box<dyn ImageScanner>>,
}

impl OrganizerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the folder to read photos from
    pub fn source(mut self, source: impl Into<PathBuf>) -> Self {
        self.config.source = source.into();
        self
    }

    /// Set the folder to organize into
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.config.destination = destination.into();
        self
    }

    /// Hash and read metadata on all cores
    ///
    /// Output is identical to a sequential run: decisions and copies still
    /// happen in traversal order.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Override the log file name
    pub fn log_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.log_file_name = name.into();
        self
    }

    /// Discover photos with `scanner` instead of walking the source folder
    ///
    /// `scan_config` is ignored and the destination is not excluded; the
    /// scanner decides what the run sees.
    pub fn scanner(mut self, scanner: impl ImageScanner + 'static) -> Self {
        self.scanner = Some(Box::new(scanner));
        self
    }

    pub fn build(self) -> Organizer {
        Organizer {
            config: self.config,
            scanner: self.scanner,
        }
    }
}

/// Copies a photo tree into year and duplicate buckets
pub struct Organizer {
    config: OrganizerConfig,
    scanner: Option<Box<dyn ImageScanner>>,
}

/// Running tallies while photos are placed
#[derive(Default)]
struct Tally {
    unique: usize,
    duplicates: usize,
    from_exif: usize,
    by_year: BTreeMap<ClassificationYear, (usize, usize)>,
    failures: Vec<FileFailure>,
}

impl Tally {
    fn copied(&mut self, bucket: Bucket, analysis: &Analysis) {
        let counts = self.by_year.entry(analysis.year).or_default();
        match bucket {
            Bucket::Unique => {
                self.unique += 1;
                counts.0 += 1;
            }
            Bucket::Duplicate => {
                self.duplicates += 1;
                counts.1 += 1;
            }
        }
        if analysis.year_source == YearSource::Exif {
            self.from_exif += 1;
        }
    }

    fn year_summaries(&self) -> Vec<YearSummary> {
        self.by_year
            .iter()
            .map(|(year, (unique, duplicates))| YearSummary {
                year: *year,
                unique: *unique,
                duplicates: *duplicates,
            })
            .collect()
    }
}

impl Organizer {
    /// Create a new organizer builder
    pub fn builder() -> OrganizerBuilder {
        OrganizerBuilder::new()
    }

    pub fn config(&self) -> &OrganizerConfig {
        &self.config
    }

    /// Run without events
    pub fn run(&self) -> Result<OrganizeReport, OrganizerError> {
        self.run_with_events(&null_sender())
    }

    /// Run with event reporting
    ///
    /// Only an unusable source folder fails the run. Every per-file problem
    /// lands in [`OrganizeReport::failures`], and a log that cannot be
    /// written lands in [`OrganizeReport::log_error`].
    pub fn run_with_events(&self, events: &EventSender) -> Result<OrganizeReport, OrganizerError> {
        let start_time = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let destination = &self.config.destination;

        if destination.as_os_str().is_empty() {
            return Err(OrganizerError::Config(
                "destination folder is required".to_string(),
            ));
        }

        tracing::info!(
            run_id = %run_id,
            source = %self.config.source.display(),
            destination = %destination.display(),
            "organize run started"
        );
        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: Scanning
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));

        let destination_in_source = destination_inside(&self.config.source, destination);
        if destination_in_source {
            tracing::warn!(
                destination = %destination.display(),
                "destination is inside the source folder and will not be scanned"
            );
        }

        let scan_result = match &self.scanner {
            Some(scanner) => scanner.scan_with_events(&self.config.source, events)?,
            None => {
                let mut scan_config = self.config.scan_config.clone();
                scan_config.exclude.push(destination.clone());
                WalkDirScanner::new(scan_config).scan_with_events(&self.config.source, events)?
            }
        };

        let photos = scan_result.photos;
        let total_photos = photos.len();
        let mut tally = Tally::default();

        for error in scan_result.errors {
            tally.failures.push(FileFailure {
                path: error.path().to_path_buf(),
                message: error.to_string(),
            });
        }

        // Phase 2: Classifying
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Classifying,
        }));
        events.send(Event::Organize(OrganizeEvent::Started { total_photos }));

        let analyses = self.analyze_all(&photos, events);

        // Phase 3: Copying, in traversal order so the first file wins
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Copying,
        }));

        let classifier = Classifier::new();
        let journal = OrganizeJournal::new();
        let mut executor = OrganizeExecutor::new();

        for (i, (photo, analysis)) in photos.iter().zip(analyses).enumerate() {
            let outcome = analysis.and_then(|analysis| {
                let decision = classifier.decide(&analysis);
                let directory = decision.directory(destination);
                executor.place(photo, &directory)?;
                Ok((analysis, decision.bucket, directory))
            });

            match outcome {
                Ok((analysis, bucket, directory)) => {
                    let file_name = photo
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();

                    tracing::debug!(
                        path = %photo.path.display(),
                        bucket = ?bucket,
                        year = %analysis.year,
                        "photo copied"
                    );
                    events.send(Event::Organize(OrganizeEvent::PhotoCopied {
                        source: photo.path.clone(),
                        destination: directory.join(&file_name),
                        bucket,
                        year: analysis.year.value(),
                    }));

                    journal.record(LogEntry {
                        source: photo.path.clone(),
                        directory,
                        file_name,
                    });
                    tally.copied(bucket, &analysis);
                }
                Err(e) => {
                    tracing::warn!(path = %photo.path.display(), error = %e, "photo skipped");
                    events.send(Event::Organize(OrganizeEvent::FileFailed {
                        path: photo.path.clone(),
                        message: e.to_string(),
                    }));
                    tally.failures.push(FileFailure {
                        path: photo.path.clone(),
                        message: e.to_string(),
                    });
                }
            }

            events.send(Event::Organize(OrganizeEvent::Progress(OrganizeProgress {
                completed: i + 1,
                total: total_photos,
                current_path: photo.path.clone(),
            })));
        }

        events.send(Event::Organize(OrganizeEvent::Completed {
            copied: journal.len(),
            failed: tally.failures.len(),
        }));

        // Phase 4: Writing the log
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::WritingLog,
        }));

        let log_path = destination.join(&self.config.log_file_name);
        let log_error = match journal.flush(&log_path) {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(error = %e, "organization log not written");
                events.send(Event::Pipeline(PipelineEvent::Error {
                    message: e.to_string(),
                }));
                Some(e.to_string())
            }
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_photos,
                unique_count: tally.unique,
                duplicate_count: tally.duplicates,
                failed_count: tally.failures.len(),
                duration_ms,
            },
        }));

        tracing::info!(
            run_id = %run_id,
            unique = tally.unique,
            duplicates = tally.duplicates,
            failed = tally.failures.len(),
            duration_ms,
            "organize run finished"
        );

        Ok(OrganizeReport {
            run_id,
            source: self.config.source.clone(),
            destination: destination.clone(),
            total_photos,
            unique_count: tally.unique,
            duplicate_count: tally.duplicates,
            dated_from_exif: tally.from_exif,
            folders_created: executor.folders_created(),
            by_year: tally.year_summaries(),
            failures: tally.failures,
            log_path,
            log_error,
            destination_in_source,
            duration_ms,
        })
    }

    /// Year and fingerprint for every photo, in input order
    fn analyze_all(
        &self,
        photos: &[ImageFile],
        events: &EventSender,
    ) -> Vec<Result<Analysis, OrganizerError>> {
        let total = photos.len();
        let completed = AtomicUsize::new(0);

        let analyze = |photo: &ImageFile| {
            let result = Classifier::analyze(photo);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            events.send(Event::Organize(OrganizeEvent::Progress(OrganizeProgress {
                completed: done,
                total,
                current_path: photo.path.clone(),
            })));
            result
        };

        if self.config.parallel {
            photos.par_iter().map(analyze).collect()
        } else {
            photos.iter().map(analyze).collect()
        }
    }
}

/// Whether an existing `destination` lies inside `source`
fn destination_inside(source: &Path, destination: &Path) -> bool {
    match (source.canonicalize(), destination.canonicalize()) {
        (Ok(source), Ok(destination)) => destination.starts_with(source),
        _ => false,
    }
}

/// Path of the log a run into `destination` writes
pub fn log_path(destination: &Path) -> PathBuf {
    destination.join(LOG_FILE_NAME)
}
