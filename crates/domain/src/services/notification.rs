//! Notification service.
//!
//! Notifications are sent after the triggering change has been committed.
//! Sending is best-effort: failures are logged and never reach the caller.

use std::sync::Mutex;

/// Result of a notification send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationResult {
    /// Notification was sent successfully.
    Sent,
    /// Notification sending failed (but was non-blocking).
    Failed(String),
    /// Notification was skipped (notifications disabled).
    Skipped,
}

/// Notification service trait.
#[async_trait::async_trait]
pub trait NotificationService: Send + Sync {
    /// Send a message to one recipient (an email address).
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> NotificationResult;
}

/// Sends a notification and logs the outcome. Never fails.
pub async fn dispatch(
    notifier: &dyn NotificationService,
    recipient: &str,
    subject: &str,
    body: &str,
) -> NotificationResult {
    let result = notifier.notify(recipient, subject, body).await;
    match &result {
        NotificationResult::Sent => {
            tracing::debug!(recipient = %recipient, subject = %subject, "Notification sent");
        }
        NotificationResult::Failed(reason) => {
            tracing::warn!(
                recipient = %recipient,
                subject = %subject,
                reason = %reason,
                "Notification failed"
            );
        }
        NotificationResult::Skipped => {
            tracing::debug!(recipient = %recipient, subject = %subject, "Notification skipped");
        }
    }
    result
}

/// Writes each notification as a structured log line.
#[derive(Debug, Clone)]
pub struct LoggingNotificationService {
    sender: String,
}

impl LoggingNotificationService {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait::async_trait]
impl NotificationService for LoggingNotificationService {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> NotificationResult {
        tracing::info!(
            sender = %self.sender,
            recipient = %recipient,
            subject = %subject,
            body_len = body.len(),
            "Notification"
        );
        NotificationResult::Sent
    }
}

/// Skips every notification.
#[derive(Debug, Clone, Default)]
pub struct DisabledNotificationService;

#[async_trait::async_trait]
impl NotificationService for DisabledNotificationService {
    async fn notify(&self, _recipient: &str, _subject: &str, _body: &str) -> NotificationResult {
        NotificationResult::Skipped
    }
}

/// A notification captured by [`MockNotificationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Mock notification service for development and testing.
///
/// Records notifications instead of sending them.
#[derive(Debug, Default)]
pub struct MockNotificationService {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
    sent: Mutex<Vec<SentNotification>>,
}

impl MockNotificationService {
    /// Create a new mock notification service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that simulates failures.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Notifications recorded so far.
    pub fn sent(&self) -> Vec<SentNotification> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait::async_trait]
impl NotificationService for MockNotificationService {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> NotificationResult {
        if self.simulate_failure {
            tracing::warn!(
                recipient = %recipient,
                "Mock notification service simulating failure"
            );
            return NotificationResult::Failed("Simulated failure".to_string());
        }

        let notification = SentNotification {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };
        match self.sent.lock() {
            Ok(mut sent) => sent.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }

        NotificationResult::Sent
    }
}
