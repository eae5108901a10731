//! Tapedeck - terminal voice memo recorder
//!
//! This crate provides the core functionality for capturing voice memos from
//! the microphone, playing them back, and mirroring recording status into
//! desktop notifications.
//!
//! # Layout
//!
//! The crate is organized as ports and adapters:
//!
//! - **Domain**: transport state machine, value objects, and error types
//! - **Application**: the recording screen use case and the port traits it drives
//! - **Infrastructure**: adapters binding those ports to cpal, rodio, notify-rust, etc.
//! - **CLI**: argument parsing, the interactive screen loop, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
