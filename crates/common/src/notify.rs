use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification timed out")]
    Timeout,

    #[error("notification send failed: {0}")]
    Send(String),
}

/// Delivery channel for alert messages. Implementations must bound the send
/// with a timeout and report the outcome; drivers decide what to do with a
/// failure, it never aborts an evaluation.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}
