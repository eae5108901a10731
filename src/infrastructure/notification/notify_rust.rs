//! notify-rust notification adapter
//!
//! Works on Windows, macOS, and Linux. Where the desktop speaks the
//! freedesktop protocol the live status notification is updated in
//! place through its handle; elsewhere every update posts anew.

use std::sync::Mutex as StdMutex;

use async_trait::async_trait;

use crate::application::ports::{
    ChannelSpec, Importance, NotificationKind, NotifyAccess, NotifyError, StatusNotifier,
};

/// Icon shown on the live recording status notification
const STATUS_ICON: &str = "audio-input-microphone";

/// Notifier speaking to the desktop through notify-rust
pub struct NotifyRustNotifier {
    /// Name notifications are attributed to
    app_name: String,
    /// Importance of the status channel, set at install time
    importance: StdMutex<Importance>,
    /// Handle of the live status notification, while one is shown
    #[cfg(all(unix, not(target_os = "macos")))]
    status_handle: StdMutex<Option<notify_rust::NotificationHandle>>,
}

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self {
            app_name: "tapedeck".to_string(),
            importance: StdMutex::new(Importance::Normal),
            #[cfg(all(unix, not(target_os = "macos")))]
            status_handle: StdMutex::new(None),
        }
    }

    /// Use a different attribution name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            importance: StdMutex::new(Importance::Normal),
            #[cfg(all(unix, not(target_os = "macos")))]
            status_handle: StdMutex::new(None),
        }
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn urgency(importance: Importance) -> notify_rust::Urgency {
        match importance {
            Importance::Low => notify_rust::Urgency::Low,
            Importance::Normal => notify_rust::Urgency::Normal,
            Importance::High => notify_rust::Urgency::Critical,
        }
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusNotifier for NotifyRustNotifier {
    async fn request_access(&self) -> Result<NotifyAccess, NotifyError> {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            // Reaching the notification server is the grant
            let probe = tokio::task::spawn_blocking(notify_rust::get_server_information)
                .await
                .map_err(|e| NotifyError::SendFailed(format!("blocking task join failed: {}", e)))?;

            return Ok(match probe {
                Ok(_) => NotifyAccess::Granted,
                Err(_) => NotifyAccess::Denied,
            });
        }

        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            Ok(NotifyAccess::Granted)
        }
    }

    async fn install_channel(&self, spec: &ChannelSpec) -> Result<(), NotifyError> {
        // The desktop has no channel object; the importance carries
        // over as the urgency of the live status notification
        *self.importance.lock().unwrap() = spec.importance;
        Ok(())
    }

    async fn show_status(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            let title = title.to_owned();
            let body = body.to_owned();

            let existing = self.status_handle.lock().unwrap().take();

            if let Some(mut handle) = existing {
                let updated = tokio::task::spawn_blocking(move || {
                    handle.summary(&title);
                    handle.body(&body);
                    handle.update();
                    handle
                })
                .await
                .map_err(|e| NotifyError::SendFailed(format!("blocking task join failed: {}", e)))?;

                *self.status_handle.lock().unwrap() = Some(updated);
                return Ok(());
            }

            let app_name = self.app_name.clone();
            let urgency = Self::urgency(*self.importance.lock().unwrap());

            let handle = tokio::task::spawn_blocking(move || {
                notify_rust::Notification::new()
                    .appname(&app_name)
                    .summary(&title)
                    .body(&body)
                    .icon(STATUS_ICON)
                    .urgency(urgency)
                    .timeout(notify_rust::Timeout::Never)
                    .show()
                    .map_err(|e| NotifyError::SendFailed(e.to_string()))
            })
            .await
            .map_err(|e| NotifyError::SendFailed(format!("blocking task join failed: {}", e)))??;

            *self.status_handle.lock().unwrap() = Some(handle);
            return Ok(());
        }

        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            // No handle updates here; each refresh posts a fresh
            // notification
            self.post(title, body, NotificationKind::Info).await
        }
    }

    async fn post(
        &self,
        title: &str,
        body: &str,
        kind: NotificationKind,
    ) -> Result<(), NotifyError> {
        let title = title.to_owned();
        let body = body.to_owned();
        let app_name = self.app_name.clone();
        let icon_name = kind.icon_name().to_string();

        // Showing a notification blocks on the bus round-trip
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(&app_name)
                .summary(&title)
                .body(&body)
                .icon(&icon_name)
                .show()
                .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

            Ok(())
        })
        .await
        .map_err(|e| NotifyError::SendFailed(format!("blocking task join failed: {}", e)))?
    }

    async fn dismiss_status(&self) -> Result<(), NotifyError> {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            let handle = self.status_handle.lock().unwrap().take();

            if let Some(handle) = handle {
                tokio::task::spawn_blocking(move || handle.close())
                    .await
                    .map_err(|e| NotifyError::DismissFailed(format!("blocking task join failed: {}", e)))?;
            }
        }

        Ok(())
    }

    async fn dismiss_all(&self) -> Result<(), NotifyError> {
        // One-shot notifications expire on their own; the live status
        // notification is the only one we can take back
        self.dismiss_status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructs_with_default_name() {
        let _notifier = NotifyRustNotifier::new();
    }

    #[test]
    fn constructs_with_custom_name() {
        let notifier = NotifyRustNotifier::with_app_name("TestApp");
        assert_eq!(notifier.app_name, "TestApp");
    }

    #[test]
    fn default_impl_uses_crate_name() {
        let notifier = NotifyRustNotifier::default();
        assert_eq!(notifier.app_name, "tapedeck");
    }

    #[tokio::test]
    async fn install_channel_records_the_importance() {
        let notifier = NotifyRustNotifier::new();
        let spec = ChannelSpec {
            id: "recording-status",
            name: "Recording status",
            importance: Importance::High,
        };

        notifier.install_channel(&spec).await.unwrap();
        assert_eq!(*notifier.importance.lock().unwrap(), Importance::High);
    }
}
