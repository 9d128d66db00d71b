use crate::domain::pet::Fid;
use crate::domain::ports::Notifier;
use async_trait::async_trait;
use tracing::info;

/// Delivers notifications to the log. Stand-in until a real push channel is
/// wired in.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, fid: &Fid, message: &str) {
        info!(%fid, text = message, "sending notification");
    }
}

/// Drops every notification.
#[derive(Debug, Default, Clone)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _fid: &Fid, _message: &str) {}
}
