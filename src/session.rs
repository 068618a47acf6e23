use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{Error, Result};

/// The four operator-supplied labels, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Study,
    Site,
    Subject,
    Timepoint,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Study, Field::Site, Field::Subject, Field::Timepoint];

    /// Key used in the defaults file.
    pub fn key(self) -> &'static str {
        match self {
            Field::Study => "study",
            Field::Site => "site",
            Field::Subject => "subject",
            Field::Timepoint => "timepoint",
        }
    }

    /// Text shown to the operator when asking for this field.
    pub fn prompt_text(self) -> &'static str {
        match self {
            Field::Study => "Enter study name",
            Field::Site => "Enter site name",
            Field::Subject => "Enter subject name",
            Field::Timepoint => "Enter timepoint",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Checks that a label is usable both as a path segment and as a
/// defaults-file value.
pub fn validate_label(field: Field, value: &str) -> Result<()> {
    let reason = if value.is_empty() {
        Some("must not be empty")
    } else if value == "." || value == ".." {
        Some("must not be a relative directory name")
    } else if value.contains(['/', '\\']) {
        Some("must not contain a path separator")
    } else if value.contains('=') {
        Some("must not contain '='")
    } else if value.chars().any(char::is_control) {
        Some("must not contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidLabel {
            field,
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub study: String,
    pub site: String,
    pub subject: String,
    pub timepoint: String,
}

impl Labels {
    pub fn new(
        study: impl Into<String>,
        site: impl Into<String>,
        subject: impl Into<String>,
        timepoint: impl Into<String>,
    ) -> Self {
        Self {
            study: study.into(),
            site: site.into(),
            subject: subject.into(),
            timepoint: timepoint.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Study => &self.study,
            Field::Site => &self.site,
            Field::Subject => &self.subject,
            Field::Timepoint => &self.timepoint,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Study => self.study = value,
            Field::Site => self.site = value,
            Field::Subject => self.subject = value,
            Field::Timepoint => self.timepoint = value,
        }
    }

    pub fn validate(&self) -> Result<()> {
        Field::ALL
            .iter()
            .try_for_each(|&field| validate_label(field, self.get(field)))
    }

    /// `{study}-{site}_{subject}-{timepoint}`, written into every copied
    /// record's patient-name attribute.
    pub fn patient_label(&self) -> String {
        format!(
            "{}-{}_{}-{}",
            self.study, self.site, self.subject, self.timepoint
        )
    }
}

/// One intake of one volume: labels in, destination tree out.
#[derive(Debug, Clone)]
pub struct IntakeSession {
    pub labels: Labels,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub started_at: DateTime<Local>,
}

impl IntakeSession {
    /// Destination is `<destination_root>/<study>/<patient label>`.
    pub fn new(labels: Labels, source: &Path, destination_root: &Path) -> Result<Self> {
        labels.validate()?;
        let destination = destination_root
            .join(&labels.study)
            .join(labels.patient_label());
        Ok(Self {
            labels,
            source: source.to_path_buf(),
            destination,
            started_at: Local::now(),
        })
    }

    pub fn patient_label(&self) -> String {
        self.labels.patient_label()
    }
}
