use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// A mounted removable volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub name: String,
    pub path: PathBuf,
}

/// Lists the entries under `media_root`, excluding the reserved system
/// volume names. No media mounted is an empty list, not an error.
pub fn detect_volumes(media_root: &Path, system_volumes: &[String]) -> Result<Vec<Volume>> {
    let entries = fs::read_dir(media_root).map_err(|source| Error::MediaRoot {
        path: media_root.to_path_buf(),
        source,
    })?;

    let mut volumes = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::MediaRoot {
            path: media_root.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if system_volumes.iter().any(|reserved| reserved == &name) {
            debug!("Skipping system volume {}", name);
            continue;
        }
        volumes.push(Volume {
            name,
            path: entry.path(),
        });
    }

    volumes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(volumes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn reserved() -> Vec<String> {
        vec!["Macintosh HD".to_string()]
    }

    #[test]
    fn test_only_system_volume_is_empty() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("Macintosh HD")).unwrap();
        let volumes = detect_volumes(tmp.path(), &reserved()).unwrap();
        assert!(volumes.is_empty());
    }

    #[test]
    fn test_empty_media_root_is_empty() {
        let tmp = tempdir().unwrap();
        assert!(detect_volumes(tmp.path(), &reserved()).unwrap().is_empty());
    }

    #[test]
    fn test_lists_other_volumes_in_name_order() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("Macintosh HD")).unwrap();
        fs::create_dir(tmp.path().join("PATIENT_CD_2")).unwrap();
        fs::create_dir(tmp.path().join("PATIENT_CD_1")).unwrap();

        let volumes = detect_volumes(tmp.path(), &reserved()).unwrap();
        let names: Vec<&str> = volumes.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["PATIENT_CD_1", "PATIENT_CD_2"]);
        assert_eq!(volumes[0].path, tmp.path().join("PATIENT_CD_1"));
    }

    #[test]
    fn test_missing_media_root_is_an_error() {
        let tmp = tempdir().unwrap();
        let err = detect_volumes(&tmp.path().join("nope"), &reserved()).unwrap_err();
        assert!(matches!(err, Error::MediaRoot { .. }));
    }
}
