//! Microphone capture adapters
//!
//! cpal drives the capture; finished takes land as WAV files named
//! and placed by the recording store.

mod cpal_recorder;
mod store;

pub use cpal_recorder::CpalRecorder;
pub use store::RecordingStore;

/// Create the default recorder writing into the given store
pub fn create_recorder(store: RecordingStore) -> CpalRecorder {
    CpalRecorder::new(store)
}
