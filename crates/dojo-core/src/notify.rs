// ── Toast notifications ──
//
// The core pushes toasts and never reads them back. The presentation
// layer owns the queue and decides how long a toast stays visible.

use tokio::sync::mpsc;
use tracing::debug;

const SUPPORT_CHANNEL: &str = "#dojo-platform-support";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub body: String,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
        }
    }

    /// The course request went through.
    pub fn request_sent() -> Self {
        Self::new(
            ToastKind::Success,
            "Thanks for reaching out. Dojo staff will contact you soon!",
            format!("Questions in the meantime? Ask in {SUPPORT_CHANNEL}."),
        )
    }

    /// The course request failed.
    pub fn request_failed() -> Self {
        Self::new(
            ToastKind::Error,
            "Unexpected error",
            format!("Please try again, or reach out in {SUPPORT_CHANNEL}."),
        )
    }

    /// The learner asked for a course they already requested.
    pub fn already_requested() -> Self {
        Self::new(
            ToastKind::Info,
            "We're working on it!",
            format!("Your request is being processed. Reach out in {SUPPORT_CHANNEL} for updates."),
        )
    }
}

/// Where toasts go.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, toast: Toast);
}

impl NotificationSink for mpsc::UnboundedSender<Toast> {
    fn notify(&self, toast: Toast) {
        if self.send(toast).is_err() {
            debug!("toast receiver gone; dropping notification");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_delivers_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.notify(Toast::request_sent());
        tx.notify(Toast::request_failed());

        assert_eq!(rx.try_recv().unwrap().kind, ToastKind::Success);
        assert_eq!(rx.try_recv().unwrap().title, "Unexpected error");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_channel_is_not_an_error() {
        let (tx, rx) = mpsc::unbounded_channel::<Toast>();
        drop(rx);
        tx.notify(Toast::already_requested());
    }

    #[test]
    fn bodies_point_at_support() {
        for toast in [
            Toast::request_sent(),
            Toast::request_failed(),
            Toast::already_requested(),
        ] {
            assert!(toast.body.contains(SUPPORT_CHANNEL));
        }
    }
}
