use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::debug;

/// Releases a drained volume.
pub trait Ejector {
    fn eject(&self, volume_path: &Path) -> io::Result<ExitStatus>;
}

/// Runs an external command with the volume path appended as the final
/// argument, e.g. `diskutil eject /Volumes/CD`.
#[derive(Debug, Clone)]
pub struct CommandEjector {
    program: String,
    args: Vec<String>,
}

impl CommandEjector {
    /// `command` is the program followed by its leading arguments. An empty
    /// command yields `None`.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Ejector for CommandEjector {
    fn eject(&self, volume_path: &Path) -> io::Result<ExitStatus> {
        debug!(
            "Running {} {:?} {}",
            self.program,
            self.args,
            volume_path.display()
        );
        Command::new(&self.program)
            .args(&self.args)
            .arg(volume_path)
            .status()
    }
}
