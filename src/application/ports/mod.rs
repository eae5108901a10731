//! Port traits implemented by the infrastructure adapters
//!
//! The use case only ever talks to these traits; the concrete
//! backends live in `crate::infrastructure`.

pub mod config;
pub mod notifier;
pub mod player;
pub mod recorder;
pub mod scheduler;

pub use config::ConfigStore;
pub use notifier::{
    ChannelSpec, Importance, NotificationKind, NotifyAccess, NotifyError, StatusNotifier,
};
pub use player::{PlaybackOptions, PlaybackStatus, Player, PlayerError, StatusCallback};
pub use recorder::{MicAccess, Recorder, RecorderError};
pub use scheduler::{ScheduleError, TaskJob, TaskScheduler};
