//! Desktop notification port

use async_trait::async_trait;
use thiserror::Error;

/// Failures raised by notification adapters
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("notify-send is not installed")]
    NotifySendNotFound,

    #[error("Could not show notification: {0}")]
    SendFailed(String),

    #[error("Failed to dismiss notification: {0}")]
    DismissFailed(String),
}

/// Result of a notification access request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyAccess {
    Granted,
    Denied,
}

/// One-shot notification kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Complete,
    Warning,
    Error,
}

impl NotificationKind {
    /// Freedesktop icon name for this kind
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Info => "dialog-information",
            Self::Complete => "dialog-ok",
            Self::Warning => "dialog-warning",
            Self::Error => "dialog-error",
        }
    }
}

/// Importance of the status channel, mapped to server urgency where the
/// platform supports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
}

/// Declaration of the channel the live status notification is posted on
#[derive(Debug, Clone)]
pub struct ChannelSpec {
    /// Stable channel identifier
    pub id: &'static str,
    /// Human-readable channel name
    pub name: &'static str,
    pub importance: Importance,
}

/// Port for desktop notifications.
///
/// The live status notification is a single sticky notification that is
/// replaced in place on every update; one-shot notifications expire on their
/// own.
#[async_trait]
pub trait StatusNotifier: Send + Sync {
    /// Check whether notifications can be delivered.
    async fn request_access(&self) -> Result<NotifyAccess, NotifyError>;

    /// Declare the status channel. Platforms without channels map the
    /// importance onto notification urgency.
    async fn install_channel(&self, spec: &ChannelSpec) -> Result<(), NotifyError>;

    /// Show or update the sticky live status notification.
    async fn show_status(&self, title: &str, body: &str) -> Result<(), NotifyError>;

    /// Post a one-shot notification.
    async fn post(&self, title: &str, body: &str, kind: NotificationKind)
        -> Result<(), NotifyError>;

    /// Remove the live status notification if present.
    async fn dismiss_status(&self) -> Result<(), NotifyError>;

    /// Remove everything this notifier put on screen.
    async fn dismiss_all(&self) -> Result<(), NotifyError>;
}

/// Lets a boxed notifier satisfy generic bounds directly
#[async_trait]
impl StatusNotifier for Box<dyn StatusNotifier> {
    async fn request_access(&self) -> Result<NotifyAccess, NotifyError> {
        self.as_ref().request_access().await
    }

    async fn install_channel(&self, spec: &ChannelSpec) -> Result<(), NotifyError> {
        self.as_ref().install_channel(spec).await
    }

    async fn show_status(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        self.as_ref().show_status(title, body).await
    }

    async fn post(
        &self,
        title: &str,
        body: &str,
        kind: NotificationKind,
    ) -> Result<(), NotifyError> {
        self.as_ref().post(title, body, kind).await
    }

    async fn dismiss_status(&self) -> Result<(), NotifyError> {
        self.as_ref().dismiss_status().await
    }

    async fn dismiss_all(&self) -> Result<(), NotifyError> {
        self.as_ref().dismiss_all().await
    }
}
