use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::session::{validate_label, Field, Labels};

/// Last-entered labels, persisted as `key=value` lines and offered as
/// defaults on the next prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedDefaults {
    values: BTreeMap<String, String>,
}

impl SavedDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The stored value for a field, if it is still a usable label.
    pub fn label(&self, field: Field) -> Option<&str> {
        self.get(field.key())
            .filter(|value| validate_label(field, value).is_ok())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<&Labels> for SavedDefaults {
    fn from(labels: &Labels) -> Self {
        let mut defaults = SavedDefaults::new();
        for field in Field::ALL {
            defaults.insert(field.key(), labels.get(field));
        }
        defaults
    }
}

impl FromIterator<(String, String)> for SavedDefaults {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Reads the defaults file. A missing file yields an empty set.
pub fn load(path: &Path) -> Result<SavedDefaults> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("No defaults file at {}", path.display());
            return Ok(SavedDefaults::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut defaults = SavedDefaults::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => defaults.insert(key, value),
            _ => {
                return Err(Error::MalformedDefaults {
                    path: path.to_path_buf(),
                    line_no: index + 1,
                    line: line.to_string(),
                })
            }
        }
    }

    debug!("Loaded {} defaults from {}", defaults.values.len(), path.display());
    Ok(defaults)
}

/// Truncates and rewrites the defaults file, one `key=value` per line.
pub fn save(path: &Path, defaults: &SavedDefaults) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let contents: String = defaults
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect();
    fs::write(path, contents)?;

    debug!("Saved defaults to {}", path.display());
    Ok(())
}
