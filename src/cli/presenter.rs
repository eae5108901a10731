//! Terminal output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::recording::Timecode;

/// Formats user-facing output and owns the live status spinner
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Show a spinner with the given status line
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Replace the spinner status line
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Finish the spinner with a green check
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Finish the spinner with a red cross
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Clear the spinner without a final message
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Informational line on stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Success line on stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Warning line on stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Error line on stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print an alert that needs the user's attention
    pub fn alert(&self, title: &str, message: &str) {
        eprintln!("{} {}: {}", "‼".red().bold(), title.bold(), message);
    }

    /// Output text to stdout (command results)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Key-value line on stdout, used by the config list view
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format elapsed recording time for the status line
    pub fn format_recording(&self, elapsed: Timecode) -> String {
        format!("Recording... {}", elapsed)
    }

    /// Format playback position as a bar with timecode labels
    pub fn format_playback(&self, position_ms: u64, duration_ms: u64) -> String {
        let percent = if duration_ms > 0 {
            (position_ms as f64 / duration_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {} / {}",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            Timecode::from_millis(position_ms),
            Timecode::from_millis(duration_ms)
        )
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_playback_at_start() {
        let presenter = Presenter::new();
        let progress = presenter.format_playback(0, 65000);
        assert!(progress.contains("0:00 / 1:05"));
    }

    #[test]
    fn format_playback_at_half() {
        let presenter = Presenter::new();
        let progress = presenter.format_playback(5000, 10000);
        assert!(progress.contains("0:05 / 0:10"));
    }

    #[test]
    fn format_playback_at_end() {
        let presenter = Presenter::new();
        let progress = presenter.format_playback(10000, 10000);
        assert!(progress.contains("0:10 / 0:10"));
        assert!(!progress.contains('░'));
    }

    #[test]
    fn format_playback_empty_duration() {
        let presenter = Presenter::new();
        let progress = presenter.format_playback(0, 0);
        assert!(progress.contains("0:00 / 0:00"));
    }

    #[test]
    fn format_recording_shows_timecode() {
        let presenter = Presenter::new();
        let line = presenter.format_recording(Timecode::from_millis(65000));
        assert_eq!(line, "Recording... 1:05");
    }
}
