//! Desktop notification adapters
//!
//! notify-rust is the portable default; notify-send is a thin
//! subprocess fallback for minimal Linux setups.

mod notify_rust;
mod notify_send;

pub use notify_rust::NotifyRustNotifier;
pub use notify_send::NotifySendNotifier;

use crate::application::ports::StatusNotifier;

/// Default notifier for the current platform, backed by notify-rust
pub fn create_notifier() -> Box<dyn StatusNotifier> {
    Box::new(NotifyRustNotifier::new())
}
