//! Domain layer
//!
//! Value objects, the transport state machine, and error types.
//! Nothing here touches the outside world.

pub mod config;
pub mod error;
pub mod recording;
pub mod transport;

pub use config::AppConfig;
pub use error::*;
pub use recording::{QualityPreset, Timecode};
pub use transport::{InvalidTransition, Transport, TransportState};
