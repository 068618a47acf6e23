pub mod config;
pub mod copier;
pub mod defaults;
pub mod eject;
pub mod error;
pub mod poll;
pub mod progress;
pub mod prompt;
pub mod record;
pub mod session;
pub mod volume;

pub use config::AppConfig;
pub use copier::{copy_tree, CopyProgress};
pub use error::Error;
pub use poll::{Intake, PollOutcome, VolumeReport};
pub use progress::{FileOutcome, ProgressSink, SilentSink};
pub use session::{Field, IntakeSession, Labels};
