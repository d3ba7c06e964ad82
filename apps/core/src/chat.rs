//! Chat widget session.
//!
//! A session owns the append-only transcript. Classification happens synchronously in
//! [`ChatSession::submit`]; the "typing" pause before a reply shows up is a display timer
//! ([`TypingDelay`]) that the presentation layer may cancel. Nothing depends on it.

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::brain::responder::{AlertSink, Classification, ResponseClassifier};
use crate::config::WellnessConfig;
use crate::models::ChatMessage;

pub const GREETING: &str =
    "Hello! I'm your AI wellness companion. How can I support you today?";

/// Delay the portal shows the typing indicator for.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(1500);

/// A classified reply waiting to be shown.
///
/// The bot message is built when the user's message is classified, so its timestamp is
/// the classification time whatever the display delay.
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub message: ChatMessage,
    pub classification: Classification,
}

pub struct ChatSession<A: AlertSink> {
    classifier: ResponseClassifier,
    alerts: A,
    transcript: Vec<ChatMessage>,
}

impl<A: AlertSink> ChatSession<A> {
    /// Starts a session with the greeting already in the transcript.
    pub fn new(alerts: A) -> Self {
        Self {
            classifier: ResponseClassifier::new(),
            alerts,
            transcript: vec![ChatMessage::bot(GREETING)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Records the user's message and classifies it.
    ///
    /// Blank input is ignored: nothing is appended and the classifier is not called.
    /// Crisis messages raise the safety alert before this returns.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn submit(&mut self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            debug!("ignoring blank message");
            return None;
        }

        self.transcript.push(ChatMessage::user(text));
        let classification = self.classifier.classify(text);

        if let Some(alert) = &classification.alert {
            self.alerts.raise(alert);
        }

        Some(PendingReply {
            message: ChatMessage::bot(classification.reply.clone()),
            classification,
        })
    }

    /// Appends the bot reply to the transcript and returns it.
    pub fn deliver(&mut self, reply: PendingReply) -> Option<&ChatMessage> {
        self.transcript.push(reply.message);
        self.transcript.last()
    }

    /// Submit and deliver in one step, skipping any display delay.
    pub fn respond(&mut self, text: &str) -> Option<&ChatMessage> {
        let pending = self.submit(text)?;
        self.deliver(pending)
    }
}

/// Cancelable display timer for bot replies. Requires a tokio runtime.
#[derive(Debug, Clone, Copy)]
pub struct TypingDelay {
    delay: Duration,
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_DELAY)
    }
}

impl From<&WellnessConfig> for TypingDelay {
    fn from(config: &WellnessConfig) -> Self {
        Self::new(config.typing_delay)
    }
}

impl TypingDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Hands the reply back after the delay unless cancelled first.
    pub fn schedule(&self, reply: PendingReply) -> ScheduledReply {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            reply
        });
        ScheduledReply { handle }
    }
}

/// A reply held back by [`TypingDelay`].
pub struct ScheduledReply {
    handle: JoinHandle<PendingReply>,
}

impl ScheduledReply {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the delay; `None` if the reply was cancelled.
    pub async fn ready(self) -> Option<PendingReply> {
        self.handle.await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::responder::{ResponseCategory, TracingAlertSink};
    use crate::models::Sender;

    #[test]
    fn test_session_starts_with_greeting() {
        let session = ChatSession::new(TracingAlertSink);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text, GREETING);
        assert_eq!(session.messages()[0].sender, Sender::Bot);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut session = ChatSession::new(TracingAlertSink);
        assert!(session.submit("   ").is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_reply_follows_user_message() {
        let mut session = ChatSession::new(TracingAlertSink);
        let pending = session.submit("I can't sleep").unwrap();
        assert_eq!(pending.classification.category, ResponseCategory::Sleep);
        assert_eq!(session.messages().len(), 2);

        let pending_id = pending.message.id;
        let delivered = session.deliver(pending).expect("reply appended");
        assert_eq!(delivered.id, pending_id);
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "I can't sleep");
        assert_eq!(messages[2].sender, Sender::Bot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_delay_releases_reply() {
        let mut session = ChatSession::new(TracingAlertSink);
        let pending = session.submit("feeling worried").unwrap();

        let scheduled = TypingDelay::default().schedule(pending);
        let reply = scheduled.ready().await.expect("reply should be delivered");
        assert_eq!(reply.classification.category, ResponseCategory::Anxiety);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_timestamp_is_set_at_classification() {
        let mut session = ChatSession::new(TracingAlertSink);
        let pending = session.submit("so much stress").unwrap();
        let classified_at = pending.message.timestamp;
        assert_eq!(pending.message.text, pending.classification.reply);

        let scheduled = TypingDelay::new(Duration::from_millis(1500)).schedule(pending);
        let pending = scheduled.ready().await.unwrap();
        let delivered = session.deliver(pending).unwrap();
        assert_eq!(delivered.timestamp, classified_at);
        assert_eq!(delivered.sender, Sender::Bot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_follows_config() {
        let config = WellnessConfig {
            typing_delay: Duration::from_millis(250),
            ..WellnessConfig::default()
        };
        let delay = TypingDelay::from(&config);
        assert_eq!(delay.delay(), Duration::from_millis(250));

        let mut session = ChatSession::new(TracingAlertSink);
        let start = tokio::time::Instant::now();
        let scheduled = delay.schedule(session.submit("hello").unwrap());
        scheduled.ready().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_reply_is_dropped() {
        let mut session = ChatSession::new(TracingAlertSink);
        let pending = session.submit("hello").unwrap();

        let scheduled = TypingDelay::new(Duration::from_secs(5)).schedule(pending);
        scheduled.cancel();
        assert!(scheduled.ready().await.is_none());
        assert_eq!(session.messages().len(), 2);
    }
}
