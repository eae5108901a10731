//! Signal handling for the interactive screen

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// Signals the screen loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSignal {
    /// Shut down the screen (SIGINT/SIGTERM)
    Shutdown,
}

/// Screen signal handler
///
/// Turns SIGINT and SIGTERM into channel messages so the screen loop
/// can select on them alongside user input.
pub struct ScreenSignalHandler {
    receiver: mpsc::Receiver<ScreenSignal>,
}

impl ScreenSignalHandler {
    /// Create a new handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender other sources can use to request
    /// a shutdown.
    pub async fn new() -> Result<(Self, mpsc::Sender<ScreenSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!("{} SIGINT received, shutting down", "↓".cyan());
            let _ = tx_int.send(ScreenSignal::Shutdown).await;
        });

        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} SIGTERM received, shutting down", "↓".cyan());
            let _ = tx_term.send(ScreenSignal::Shutdown).await;
        });

        Ok((Self { receiver: rx }, tx))
    }

    /// Next signal, if any
    pub async fn recv(&mut self) -> Option<ScreenSignal> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sender_reaches_the_loop() {
        let (mut handler, tx) = ScreenSignalHandler::new().await.unwrap();
        tx.send(ScreenSignal::Shutdown).await.unwrap();
        assert_eq!(handler.recv().await, Some(ScreenSignal::Shutdown));
    }
}
