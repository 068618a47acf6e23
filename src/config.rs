use std::path::{Path, PathBuf};

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory whose children are the mounted removable volumes.
    #[serde(default = "default_media_root")]
    pub media_root: PathBuf,
    /// Children of `media_root` that are never treated as volumes.
    #[serde(default = "default_system_volumes")]
    pub system_volumes: Vec<String>,
    #[serde(default = "default_destination_root")]
    pub destination_root: PathBuf,
    #[serde(default = "default_defaults_file")]
    pub defaults_file: PathBuf,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Program and leading arguments; the volume path is appended.
    #[serde(default = "default_eject_command")]
    pub eject_command: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            media_root: default_media_root(),
            system_volumes: default_system_volumes(),
            destination_root: default_destination_root(),
            defaults_file: default_defaults_file(),
            poll_interval_secs: default_poll_interval_secs(),
            eject_command: default_eject_command(),
        }
    }
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub media_root: Option<PathBuf>,
    pub destination_root: Option<PathBuf>,
    pub poll_interval_secs: Option<u64>,
}

fn default_media_root() -> PathBuf {
    if cfg!(target_os = "macos") {
        PathBuf::from("/Volumes")
    } else {
        PathBuf::from("/media")
    }
}

fn default_system_volumes() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["Macintosh HD".to_string()]
    } else {
        Vec::new()
    }
}

fn default_destination_root() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("intake"))
}

fn default_defaults_file() -> PathBuf {
    PathBuf::from("user_input.txt")
}

fn default_poll_interval_secs() -> u64 {
    1
}

fn default_eject_command() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["diskutil".to_string(), "eject".to_string()]
    } else {
        vec!["eject".to_string()]
    }
}

fn path_override(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}

fn with_overrides(
    builder: ConfigBuilder<DefaultState>,
    overrides: &Overrides,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_override_option("media_root", path_override(&overrides.media_root))?
        .set_override_option(
            "destination_root",
            path_override(&overrides.destination_root),
        )?
        .set_override_option(
            "poll_interval_secs",
            overrides.poll_interval_secs.map(|secs| secs as i64),
        )
}

/// Layers `Config.*` in the working directory, `INTAKE_*` environment
/// variables and command-line overrides over the built-in defaults.
pub fn load_configuration(overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("INTAKE")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("system_volumes")
                .with_list_parse_key("eject_command"),
        );
    with_overrides(builder, overrides)?
        .build()?
        .try_deserialize::<AppConfig>()
}

/// Reads an explicit configuration file, then applies the overrides.
pub fn load_configuration_from(path: &Path, overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder().add_source(ConfigFile::from(path));
    with_overrides(builder, overrides)?
        .build()?
        .try_deserialize::<AppConfig>()
}
