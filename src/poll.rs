use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use colored::*;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::copier::{self, CopyProgress};
use crate::defaults::{self, SavedDefaults};
use crate::eject::Ejector;
use crate::error::Result;
use crate::progress::ProgressSink;
use crate::prompt::LabelSource;
use crate::session::IntakeSession;
use crate::volume::{self, Volume};

/// What happened to one volume during a drain.
#[derive(Debug)]
pub struct VolumeReport {
    pub volume: Volume,
    pub session: IntakeSession,
    /// `None` when the copy was aborted by an error.
    pub progress: Option<CopyProgress>,
    /// `None` when the eject command could not be started.
    pub ejected: Option<bool>,
    /// When the copy ended, successfully or not.
    pub finished_at: DateTime<Local>,
}

impl VolumeReport {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.session.started_at
    }
}

/// Result of one detection pass.
#[derive(Debug)]
pub enum PollOutcome {
    Idle,
    Drained(Vec<VolumeReport>),
}

/// The detect, prompt, copy, eject cycle over a set of collaborators.
pub struct Intake<'a> {
    config: &'a AppConfig,
    labels: &'a mut dyn LabelSource,
    sink: &'a dyn ProgressSink,
    ejector: Option<&'a dyn Ejector>,
    out: Box<dyn Write + 'a>,
}

impl<'a> Intake<'a> {
    pub fn new(
        config: &'a AppConfig,
        labels: &'a mut dyn LabelSource,
        sink: &'a dyn ProgressSink,
        ejector: Option<&'a dyn Ejector>,
    ) -> Self {
        Self {
            config,
            labels,
            sink,
            ejector,
            out: Box::new(io::stdout()),
        }
    }

    /// Sends operator status lines to `out` instead of stdout.
    pub fn with_output(mut self, out: impl Write + 'a) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Polls forever, sleeping `poll_interval_secs` after every pass. Returns
    /// only on a fatal error.
    pub fn run(&mut self) -> Result<()> {
        let interval = Duration::from_secs(self.config.poll_interval_secs);
        loop {
            writeln!(self.out, "{}", "Checking...".red())?;
            self.run_once()?;
            thread::sleep(interval);
        }
    }

    /// One detection pass: drains every volume present at detection time, in
    /// listing order.
    pub fn run_once(&mut self) -> Result<PollOutcome> {
        let volumes = volume::detect_volumes(&self.config.media_root, &self.config.system_volumes)?;
        if volumes.is_empty() {
            debug!("No volumes under {}", self.config.media_root.display());
            return Ok(PollOutcome::Idle);
        }

        writeln!(self.out, "{}", "CD loaded!".green())?;
        info!(
            "Detected {} volume(s): {:?}",
            volumes.len(),
            volumes.iter().map(|v| v.name.as_str()).collect::<Vec<_>>()
        );

        let mut reports = Vec::with_capacity(volumes.len());
        for volume in volumes {
            let report = self.drain(volume, true)?;
            reports.push(report);
        }
        Ok(PollOutcome::Drained(reports))
    }

    /// Handles one volume: labels, copy, then eject when asked to.
    ///
    /// A copy failure is logged and reported; failures to load or save
    /// defaults, or to read operator input, are returned. Labels that fail
    /// validation are returned before anything is written.
    pub fn drain(&mut self, volume: Volume, eject: bool) -> Result<VolumeReport> {
        let saved = defaults::load(&self.config.defaults_file)?;
        let labels = self.labels.labels(&saved)?;
        let session = IntakeSession::new(labels, &volume.path, &self.config.destination_root)?;
        defaults::save(
            &self.config.defaults_file,
            &SavedDefaults::from(&session.labels),
        )?;

        let patient_label = session.patient_label();
        info!(
            "Ingesting {} as {} into {}",
            volume.name,
            patient_label,
            session.destination.display()
        );

        let copied = copier::copy_tree(
            &patient_label,
            &session.source,
            &session.destination,
            self.sink,
        );
        let finished_at = Local::now();
        let seconds = (finished_at - session.started_at).num_milliseconds() as f64 / 1000.0;

        let progress = match copied {
            Ok(progress) => {
                info!("Ingested {} in {:.1}s", volume.name, seconds);
                writeln!(
                    self.out,
                    "Copied {} of {} file(s), {} skipped, to {} in {:.1}s",
                    progress.processed.to_string().green(),
                    progress.total,
                    progress.skipped,
                    session.destination.display(),
                    seconds
                )?;
                Some(progress)
            }
            Err(err) => {
                error!("Copy of {} aborted after {:.1}s: {}", volume.name, seconds, err);
                None
            }
        };

        let ejected = if eject {
            self.eject(&volume.path)
        } else {
            None
        };

        Ok(VolumeReport {
            volume,
            session,
            progress,
            ejected,
            finished_at,
        })
    }

    fn eject(&self, path: &Path) -> Option<bool> {
        let ejector = self.ejector?;
        match ejector.eject(path) {
            Ok(status) => {
                if status.success() {
                    info!("Ejected {}", path.display());
                } else {
                    warn!("Eject of {} exited with {}", path.display(), status);
                }
                Some(status.success())
            }
            Err(err) => {
                warn!("Could not run eject for {}: {}", path.display(), err);
                None
            }
        }
    }
}
