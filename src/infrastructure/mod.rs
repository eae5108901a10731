//! Infrastructure layer
//!
//! Concrete implementations of the application ports, backed by the
//! audio device, the notification server, and the filesystem.

pub mod background;
pub mod config;
pub mod notification;
pub mod playback;
pub mod recording;

pub use background::TokioTaskScheduler;
pub use config::XdgConfigStore;
pub use notification::{NotifyRustNotifier, NotifySendNotifier};
pub use playback::RodioPlayer;
pub use recording::CpalRecorder;
