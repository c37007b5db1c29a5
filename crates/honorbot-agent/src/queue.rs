// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation sequential event processing.
//!
//! The first event for an idle conversation claims it by registering an
//! unbounded channel and spawning a worker that owns the conversation until
//! its channel is drained. Later events for a busy conversation are pushed
//! into the same channel and picked up by that worker, in arrival order.
//!
//! Enqueueing and releasing both happen under the registry lock, and the
//! worker re-checks its channel after taking the lock. An arrival therefore
//! either lands in a channel that is still being drained or finds the
//! conversation idle and claims it again.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::Notify;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tracing::{debug, error};

use honorbot_core::{ChatId, HonorError, InboundEvent};

/// Processes one event to completion.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    async fn handle(&self, event: InboundEvent) -> Result<(), HonorError>;
}

type Registry = HashMap<ChatId, UnboundedSender<InboundEvent>>;

struct Shared {
    handler: Arc<dyn EventHandler>,
    workers: Mutex<Registry>,
    released: Notify,
}

impl Shared {
    fn workers(&self) -> MutexGuard<'_, Registry> {
        self.workers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Coordinator owning the per-conversation queues.
///
/// Conversations are processed independently of each other; within one
/// conversation exactly one event is in flight at a time.
#[derive(Clone)]
pub struct ConversationQueue {
    shared: Arc<Shared>,
}

impl ConversationQueue {
    pub fn new(handler: Arc<dyn EventHandler>) -> Self {
        Self {
            shared: Arc::new(Shared {
                handler,
                workers: Mutex::new(HashMap::new()),
                released: Notify::new(),
            }),
        }
    }

    /// Append an event to its conversation's queue, starting a worker when
    /// the conversation is idle.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn enqueue(&self, event: InboundEvent) {
        let chat_id = event.chat_id;
        let mut workers = self.shared.workers();

        let event = match workers.get(&chat_id) {
            Some(tx) => match tx.send(event) {
                Ok(()) => return,
                // The worker is gone without releasing (its task was
                // aborted); claim the conversation anew.
                Err(mpsc::error::SendError(event)) => event,
            },
            None => event,
        };

        let rx = claim(&mut workers, chat_id, event);
        drop(workers);

        debug!(chat_id = chat_id.0, "conversation claimed");
        tokio::spawn(Worker::new(chat_id, rx, self.shared.clone()).run());
    }

    /// No worker currently owns the conversation.
    pub fn is_idle(&self, chat_id: ChatId) -> bool {
        !self.shared.workers().contains_key(&chat_id)
    }

    /// Number of conversations currently being drained.
    pub fn busy_count(&self) -> usize {
        self.shared.workers().len()
    }

    /// Wait until every conversation is idle, for at most `timeout`.
    ///
    /// Returns `false` when the timeout elapsed first.
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            loop {
                let released = self.shared.released.notified();
                if self.busy_count() == 0 {
                    return;
                }
                released.await;
            }
        })
        .await
        .is_ok()
    }
}

/// Register a fresh queue for `chat_id` holding `event`.
fn claim(workers: &mut Registry, chat_id: ChatId, event: InboundEvent) -> UnboundedReceiver<InboundEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    // The receiver is alive, so the send cannot fail.
    let _ = tx.send(event);
    workers.insert(chat_id, tx);
    rx
}

struct Worker {
    chat_id: ChatId,
    rx: UnboundedReceiver<InboundEvent>,
    shared: Arc<Shared>,
}

impl Worker {
    fn new(chat_id: ChatId, rx: UnboundedReceiver<InboundEvent>, shared: Arc<Shared>) -> Self {
        Self { chat_id, rx, shared }
    }

    async fn run(mut self) {
        while let Some(event) = self.dequeue() {
            self.process(event).await;
        }
    }

    /// Next buffered event, or `None` after releasing the conversation.
    fn dequeue(&mut self) -> Option<InboundEvent> {
        if let Ok(event) = self.rx.try_recv() {
            return Some(event);
        }

        let mut workers = self.shared.workers();
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => {
                self.release(&mut workers);
                None
            }
        }
    }

    fn release(&self, workers: &mut Registry) {
        workers.remove(&self.chat_id);
        self.shared.released.notify_waiters();
        debug!(chat_id = self.chat_id.0, "conversation released");
    }

    /// Run the handler; failures and panics drop the event and nothing else.
    async fn process(&self, event: InboundEvent) {
        let result = AssertUnwindSafe(self.shared.handler.handle(event))
            .catch_unwind()
            .await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(chat_id = self.chat_id.0, error = %e, "event processing failed, event dropped");
            }
            Err(panic) => {
                error!(
                    chat_id = self.chat_id.0,
                    panic = panic_message(panic.as_ref()),
                    "event handler panicked, event dropped"
                );
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
