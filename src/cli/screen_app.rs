//! Interactive recording screen loop

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::{PlaybackToggle, RecordingScreenUseCase, ScreenError, StartOutcome};
use crate::domain::recording::Timecode;
use crate::domain::transport::TransportState;

use super::presenter::Presenter;
use super::signals::{ScreenSignal, ScreenSignalHandler};

/// How often the status line is redrawn
const RENDER_INTERVAL: Duration = Duration::from_millis(200);

/// Commands accepted on the screen prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    Record,
    Stop,
    Play,
    Seek(Timecode),
    Status,
    Help,
    Quit,
}

/// Parse a line of user input into a command.
///
/// Blank lines parse to None. Unknown commands and malformed arguments
/// produce a message for the user.
pub fn parse_command(input: &str) -> Result<Option<ScreenCommand>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut parts = trimmed.split_whitespace();
    let word = parts.next().unwrap_or_default().to_lowercase();

    let command = match word.as_str() {
        "record" | "r" => ScreenCommand::Record,
        "stop" | "s" => ScreenCommand::Stop,
        "play" | "pause" | "p" => ScreenCommand::Play,
        "seek" => {
            let target = parts
                .next()
                .ok_or_else(|| "Usage: seek <minutes:seconds>".to_string())?;
            let timecode = target
                .parse::<Timecode>()
                .map_err(|e| e.to_string())?;
            ScreenCommand::Seek(timecode)
        }
        "status" => ScreenCommand::Status,
        "help" | "h" | "?" => ScreenCommand::Help,
        "quit" | "exit" | "q" => ScreenCommand::Quit,
        _ => return Err(format!("Unknown command: '{}'. Type 'help' for commands", word)),
    };

    if parts.next().is_some() {
        return Err("Too many arguments. Type 'help' for commands".to_string());
    }

    Ok(Some(command))
}

/// Run the screen loop until the user quits or a shutdown signal arrives.
///
/// Returns true on a clean exit.
pub async fn run_screen_loop<R, P, N, B>(
    screen: &RecordingScreenUseCase<R, P, N, B>,
    signals: &mut ScreenSignalHandler,
    presenter: &mut Presenter,
) -> bool
where
    R: crate::application::ports::Recorder + 'static,
    P: crate::application::ports::Player,
    N: crate::application::ports::StatusNotifier + 'static,
    B: crate::application::ports::TaskScheduler,
{
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut render = tokio::time::interval(RENDER_INTERVAL);
    let mut was_playing = false;

    presenter.info("Ready. Type 'help' for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(input)) => match parse_command(&input) {
                        Ok(Some(command)) => {
                            if handle_command(screen, presenter, command).await {
                                return true;
                            }
                        }
                        Ok(None) => {}
                        Err(message) => presenter.warn(&message),
                    },
                    Ok(None) => {
                        // stdin closed
                        presenter.stop_spinner();
                        return true;
                    }
                    Err(e) => {
                        presenter.error(&format!("Failed to read input: {}", e));
                        return false;
                    }
                }
            }
            signal = signals.recv() => {
                match signal {
                    Some(ScreenSignal::Shutdown) => {
                        presenter.stop_spinner();
                        presenter.info("Closing the recording screen...");
                        return true;
                    }
                    None => return false,
                }
            }
            _ = render.tick() => {
                was_playing = render_status(screen, presenter, was_playing);
            }
        }
    }
}

/// Dispatch a parsed command. Returns true when the loop should exit.
async fn handle_command<R, P, N, B>(
    screen: &RecordingScreenUseCase<R, P, N, B>,
    presenter: &mut Presenter,
    command: ScreenCommand,
) -> bool
where
    R: crate::application::ports::Recorder + 'static,
    P: crate::application::ports::Player,
    N: crate::application::ports::StatusNotifier + 'static,
    B: crate::application::ports::TaskScheduler,
{
    match command {
        ScreenCommand::Record => match screen.start_recording().await {
            Ok(StartOutcome::Started) => {
                presenter.start_spinner("Recording... 0:00");
            }
            Ok(StartOutcome::AccessDenied) => {
                presenter.alert(
                    "Microphone access denied",
                    "Grant microphone access and try again",
                );
            }
            Err(e) => presenter.error(&format!("Could not start recording: {}", e)),
        },
        ScreenCommand::Stop => match screen.stop_recording().await {
            Ok(path) => {
                presenter.spinner_success("Recording complete");
                presenter.info(&format!("Saved to {}", path.display()));
            }
            Err(ScreenError::Transport(e)) => presenter.warn(&e.to_string()),
            Err(e) => {
                presenter.spinner_fail("Recording failed");
                presenter.error(&e.to_string());
            }
        },
        ScreenCommand::Play => match screen.toggle_playback().await {
            Ok(PlaybackToggle::Started) | Ok(PlaybackToggle::Resumed) => {
                presenter.start_spinner("Playing...");
            }
            Ok(PlaybackToggle::Paused) => {
                presenter.stop_spinner();
                let status = screen.playback_status();
                presenter.info(&format!(
                    "Paused at {}",
                    Timecode::from_millis(status.position_ms)
                ));
            }
            Err(ScreenError::NothingToPlay) => presenter.warn("Nothing recorded yet"),
            Err(ScreenError::Transport(e)) => presenter.warn(&e.to_string()),
            Err(e) => presenter.error(&e.to_string()),
        },
        ScreenCommand::Seek(target) => match screen.seek(target).await {
            Ok(position) => presenter.info(&format!("Position: {}", position)),
            Err(e) => presenter.warn(&e.to_string()),
        },
        ScreenCommand::Status => show_status(screen, presenter),
        ScreenCommand::Help => print_help(presenter),
        ScreenCommand::Quit => {
            presenter.stop_spinner();
            return true;
        }
    }

    false
}

/// Redraw the live status line. Returns whether playback is running so
/// the caller can detect the memo finishing on its own.
fn render_status<R, P, N, B>(
    screen: &RecordingScreenUseCase<R, P, N, B>,
    presenter: &mut Presenter,
    was_playing: bool,
) -> bool
where
    R: crate::application::ports::Recorder + 'static,
    P: crate::application::ports::Player,
    N: crate::application::ports::StatusNotifier + 'static,
    B: crate::application::ports::TaskScheduler,
{
    let state = screen.state();

    match state {
        TransportState::Recording => {
            presenter.update_spinner(&presenter.format_recording(screen.recording_elapsed()));
        }
        TransportState::Playing => {
            let status = screen.playback_status();
            presenter.update_spinner(&format!(
                "Playing  {}",
                presenter.format_playback(status.position_ms, status.duration_ms)
            ));
        }
        TransportState::Stopped if was_playing => {
            presenter.spinner_success("Playback finished");
        }
        _ => {}
    }

    state == TransportState::Playing
}

fn show_status<R, P, N, B>(screen: &RecordingScreenUseCase<R, P, N, B>, presenter: &Presenter)
where
    R: crate::application::ports::Recorder + 'static,
    P: crate::application::ports::Player,
    N: crate::application::ports::StatusNotifier + 'static,
    B: crate::application::ports::TaskScheduler,
{
    let state = screen.state();

    match state {
        TransportState::Idle => presenter.info("Idle. Nothing recorded yet"),
        TransportState::Recording => {
            presenter.info(&format!("Recording  {}", screen.recording_elapsed()));
        }
        TransportState::Stopped => match screen.recording_path() {
            Some(path) => presenter.info(&format!("Stopped  memo at {}", path.display())),
            None => presenter.info("Stopped"),
        },
        TransportState::Playing | TransportState::Paused => {
            let status = screen.playback_status();
            let label = if state == TransportState::Playing {
                "Playing"
            } else {
                "Paused"
            };
            presenter.info(&format!(
                "{}  {} / {}",
                label,
                Timecode::from_millis(status.position_ms),
                Timecode::from_millis(status.duration_ms)
            ));
        }
    }
}

fn print_help(presenter: &Presenter) {
    presenter.output("Commands:");
    presenter.output("  record (r)       Start a new recording");
    presenter.output("  stop (s)         Stop and save the recording");
    presenter.output("  play (p)         Toggle playback of the last memo");
    presenter.output("  seek <m:ss>      Jump to a position in the memo");
    presenter.output("  status           Show the transport state");
    presenter.output("  help (?)         Show this help");
    presenter.output("  quit (q)         Exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_word_commands() {
        assert_eq!(parse_command("record"), Ok(Some(ScreenCommand::Record)));
        assert_eq!(parse_command("stop"), Ok(Some(ScreenCommand::Stop)));
        assert_eq!(parse_command("play"), Ok(Some(ScreenCommand::Play)));
        assert_eq!(parse_command("status"), Ok(Some(ScreenCommand::Status)));
        assert_eq!(parse_command("help"), Ok(Some(ScreenCommand::Help)));
        assert_eq!(parse_command("quit"), Ok(Some(ScreenCommand::Quit)));
    }

    #[test]
    fn parses_aliases() {
        assert_eq!(parse_command("r"), Ok(Some(ScreenCommand::Record)));
        assert_eq!(parse_command("s"), Ok(Some(ScreenCommand::Stop)));
        assert_eq!(parse_command("p"), Ok(Some(ScreenCommand::Play)));
        assert_eq!(parse_command("pause"), Ok(Some(ScreenCommand::Play)));
        assert_eq!(parse_command("?"), Ok(Some(ScreenCommand::Help)));
        assert_eq!(parse_command("q"), Ok(Some(ScreenCommand::Quit)));
        assert_eq!(parse_command("exit"), Ok(Some(ScreenCommand::Quit)));
    }

    #[test]
    fn parses_case_insensitively_with_whitespace() {
        assert_eq!(parse_command("  RECORD  "), Ok(Some(ScreenCommand::Record)));
        assert_eq!(parse_command("Play"), Ok(Some(ScreenCommand::Play)));
    }

    #[test]
    fn blank_lines_parse_to_none() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn parses_seek_with_timecode() {
        assert_eq!(
            parse_command("seek 1:05"),
            Ok(Some(ScreenCommand::Seek(Timecode::from_millis(65000))))
        );
        assert_eq!(
            parse_command("seek 5000"),
            Ok(Some(ScreenCommand::Seek(Timecode::from_millis(5000))))
        );
    }

    #[test]
    fn seek_requires_a_target() {
        assert!(parse_command("seek").is_err());
        assert!(parse_command("seek abc").is_err());
        assert!(parse_command("seek 1:99").is_err());
    }

    #[test]
    fn rejects_unknown_commands() {
        let result = parse_command("rewind");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("rewind"));
    }

    #[test]
    fn rejects_trailing_arguments() {
        assert!(parse_command("record now").is_err());
        assert!(parse_command("seek 1:05 extra").is_err());
    }
}
