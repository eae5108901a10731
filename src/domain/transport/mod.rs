//! Transport state machine for the recording screen

mod state;

pub use state::{InvalidTransition, Transport, TransportState};
