use jobseek_core::{Notification, NotificationLevel};
use jobseek_logging::seek_info;

/// Receives user-facing notifications emitted by the search controller.
pub trait Notifier: Send {
    fn notify(&self, notification: &Notification);
}

/// Prints notifications as one-line toasts on stdout.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        seek_info!(
            "Notification {:?}: {}",
            notification.level,
            notification.message
        );
        println!("{}", format_toast(notification));
    }
}

pub fn format_toast(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Info => "info",
        NotificationLevel::Success => "ok",
        NotificationLevel::Warning => "warning",
        NotificationLevel::Error => "error",
    };
    format!("[{tag}] {}", notification.message)
}
