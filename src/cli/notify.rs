use crate::gateway::{Navigator, Notice, NoticeLevel, Notifier};

/// Prints gateway notices to stderr so they never mix with command output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let label = match notice.level {
            NoticeLevel::Warning => "Warning",
            NoticeLevel::Error => "Error",
            NoticeLevel::Notification => "Notice",
        };

        match notice.description {
            Some(description) if !description.is_empty() => {
                eprintln!("{}: {} ({})", label, notice.title, description)
            }
            _ => eprintln!("{}: {}", label, notice.title),
        }
    }
}

impl Navigator for TerminalNotifier {
    fn redirect(&self, path: &str) {
        tracing::debug!(path, "login redirect");
        eprintln!("Session expired. Run `radmin auth login <username>` to sign in again.");
    }
}
