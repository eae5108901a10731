//! Playback infrastructure module
//!
//! Plays finished memos through the default output device using rodio.

mod rodio_player;

pub use rodio_player::RodioPlayer;

/// Create the default player
pub fn create_player() -> RodioPlayer {
    RodioPlayer::new()
}
