//! Confirmation and message prompts.
//!
//! Prompts are async request/response pairs answered by whatever UI is
//! attached. At most one prompt is outstanding at a time when wrapped in a
//! [`SerialPrompter`]; later requests wait their turn in FIFO order.
//! A prompt that is dismissed or whose UI has gone away resolves to `false`.

use std::future::Future;

use tokio::sync::{mpsc, oneshot, Semaphore};

/// UI collaborator for yes/no questions and acknowledge-only messages.
pub trait Prompter {
    /// Ask a yes/no question. Cancellation answers `false`.
    fn confirm(&self, message: &str) -> impl Future<Output = bool>;

    /// Show an informational message and wait until it is dismissed.
    fn acknowledge(&self, message: &str) -> impl Future<Output = ()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Confirm,
    Acknowledge,
}

/// A prompt waiting for the UI to answer it.
#[derive(Debug)]
pub struct PromptRequest {
    kind: PromptKind,
    message: String,
    reply: oneshot::Sender<bool>,
}

impl PromptRequest {
    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn respond(self, answer: bool) {
        // The asker may have given up waiting; nothing to do then.
        let _ = self.reply.send(answer);
    }

    /// Dismiss without answering. The asker sees `false`.
    pub fn cancel(self) {
        drop(self.reply);
    }
}

/// Forwards prompts to a UI loop over a channel.
#[derive(Debug, Clone)]
pub struct ChannelPrompter {
    requests: mpsc::UnboundedSender<PromptRequest>,
}

impl ChannelPrompter {
    /// Create the prompter and the receiving end the UI reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PromptRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { requests: tx }, rx)
    }

    async fn ask(&self, kind: PromptKind, message: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let request = PromptRequest {
            kind,
            message: message.to_string(),
            reply,
        };
        if self.requests.send(request).is_err() {
            tracing::debug!(?kind, "prompt UI is gone; treating as cancelled");
            return false;
        }
        answer.await.unwrap_or(false)
    }
}

impl Prompter for ChannelPrompter {
    async fn confirm(&self, message: &str) -> bool {
        self.ask(PromptKind::Confirm, message).await
    }

    async fn acknowledge(&self, message: &str) {
        self.ask(PromptKind::Acknowledge, message).await;
    }
}

/// Wraps a prompter so only one prompt is ever outstanding.
#[derive(Debug)]
pub struct SerialPrompter<P> {
    inner: P,
    slot: Semaphore,
}

impl<P: Prompter> SerialPrompter<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            slot: Semaphore::new(1),
        }
    }

    /// Whether a prompt is currently being shown.
    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: Prompter> Prompter for SerialPrompter<P> {
    async fn confirm(&self, message: &str) -> bool {
        let Ok(_permit) = self.slot.acquire().await else {
            return false;
        };
        self.inner.confirm(message).await
    }

    async fn acknowledge(&self, message: &str) {
        let Ok(_permit) = self.slot.acquire().await else {
            return;
        };
        self.inner.acknowledge(message).await
    }
}

/// Answers every confirmation with a fixed value and swallows messages.
#[derive(Debug, Clone, Copy)]
pub struct AutoPrompter {
    answer: bool,
}

impl AutoPrompter {
    pub fn yes() -> Self {
        Self { answer: true }
    }

    pub fn no() -> Self {
        Self { answer: false }
    }
}

impl Prompter for AutoPrompter {
    async fn confirm(&self, _message: &str) -> bool {
        self.answer
    }

    async fn acknowledge(&self, _message: &str) {}
}
