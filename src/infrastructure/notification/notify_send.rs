//! Adapter shelling out to the notify-send binary

use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{
    ChannelSpec, Importance, NotificationKind, NotifyAccess, NotifyError, StatusNotifier,
};

/// Icon shown on the live status notification
const STATUS_ICON: &str = "audio-input-microphone";

/// Synchronous-replacement hint shared by every status send, so each update
/// replaces the previous notification instead of stacking a new one
const STATUS_TAG: &str = "string:x-canonical-private-synchronous:tapedeck-status";

/// Notifier backed by the `notify-send` command line tool.
///
/// Fallback for environments where talking to the notification server over
/// D-Bus directly is not an option. Live status updates rely on the
/// synchronous-replacement hint, which notify-send forwards to the server.
pub struct NotifySendNotifier {
    /// Name notifications are attributed to
    app_name: String,
    /// Urgency the status channel was installed with
    importance: Mutex<Importance>,
}

impl NotifySendNotifier {
    pub fn new() -> Self {
        Self {
            app_name: "tapedeck".to_string(),
            importance: Mutex::new(Importance::default()),
        }
    }

    /// Use a different attribution name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            importance: Mutex::new(Importance::default()),
        }
    }

    fn urgency(&self) -> &'static str {
        match *self.importance.lock().unwrap() {
            Importance::Low => "low",
            Importance::Normal => "normal",
            Importance::High => "critical",
        }
    }

    async fn run(&self, args: &[&str]) -> Result<(), NotifyError> {
        let status = Command::new("notify-send")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotifyError::NotifySendNotFound
                } else {
                    NotifyError::SendFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(NotifyError::SendFailed(format!(
                "notify-send exited with {}",
                status
            )));
        }

        Ok(())
    }
}

impl Default for NotifySendNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusNotifier for NotifySendNotifier {
    async fn request_access(&self) -> Result<NotifyAccess, NotifyError> {
        let probe = Command::new("notify-send")
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match probe {
            Ok(status) if status.success() => Ok(NotifyAccess::Granted),
            _ => Ok(NotifyAccess::Denied),
        }
    }

    async fn install_channel(&self, spec: &ChannelSpec) -> Result<(), NotifyError> {
        *self.importance.lock().unwrap() = spec.importance;
        Ok(())
    }

    async fn show_status(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let urgency = self.urgency();
        self.run(&[
            "--app-name",
            &self.app_name,
            "--icon",
            STATUS_ICON,
            "-t",
            "0",
            "-u",
            urgency,
            "-h",
            STATUS_TAG,
            title,
            body,
        ])
        .await
    }

    async fn post(
        &self,
        title: &str,
        body: &str,
        kind: NotificationKind,
    ) -> Result<(), NotifyError> {
        self.run(&[
            "--app-name",
            &self.app_name,
            "--icon",
            kind.icon_name(),
            title,
            body,
        ])
        .await
    }

    async fn dismiss_status(&self) -> Result<(), NotifyError> {
        // notify-send cannot close by id; replace the tagged notification
        // with one that expires immediately
        self.run(&["--app-name", &self.app_name, "-t", "1", "-h", STATUS_TAG, " "])
            .await
    }

    async fn dismiss_all(&self) -> Result<(), NotifyError> {
        self.dismiss_status().await
    }
}
