//! Send orchestrator — one send cycle per call:
//!
//! 1. Validate (active conversation, non-blank content, not already sending)
//! 2. Clear the previous error and enter Sending
//! 3. Snapshot the history, then append the user message
//! 4. Await the completion call
//! 5. Append the assistant reply, or record the error
//! 6. Return to Idle
//!
//! The target conversation id and the history snapshot are captured before
//! the await; the result is routed by that id even if the user has since
//! selected or deleted something else.
//!
//! Store borrows never span the await, so the UI stays free to mutate the
//! store while a request is in flight.

use std::cell::RefCell;
use std::rc::Rc;

use chat_types::{event::ChatEvent, message::Message};
use crate::completion::request_completion;
use crate::event_bus::EventBus;
use crate::ports::LlmPort;
use crate::store::SharedStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
}

/// Why a send call did nothing. Not an error state: the UI ignores these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoActiveConversation,
    EmptyContent,
    UnknownConversation,
    AlreadySending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Skipped(SkipReason),
    Replied { conversation_id: String, message_id: String },
    Failed { conversation_id: String, error: String },
    /// A reply arrived after its conversation was deleted and was dropped
    Orphaned { conversation_id: String },
}

/// The single visible error slot, tied to the cycle that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendError {
    pub conversation_id: String,
    pub message: String,
}

#[derive(Debug, Default)]
struct SendStatus {
    in_flight: Vec<String>,
    error: Option<SendError>,
}

/// Clone-cheap handle; clones share store, status and event bus.
#[derive(Clone)]
pub struct SendOrchestrator {
    store: SharedStore,
    status: Rc<RefCell<SendStatus>>,
    event_bus: EventBus,
}

impl SendOrchestrator {
    pub fn new(store: SharedStore, event_bus: EventBus) -> Self {
        Self {
            store,
            status: Rc::new(RefCell::new(SendStatus::default())),
            event_bus,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn state(&self) -> SendState {
        if self.is_loading() {
            SendState::Sending
        } else {
            SendState::Idle
        }
    }

    /// True while any send cycle is in flight
    pub fn is_loading(&self) -> bool {
        !self.status.borrow().in_flight.is_empty()
    }

    pub fn is_sending(&self, conversation_id: &str) -> bool {
        self.status
            .borrow()
            .in_flight
            .iter()
            .any(|id| id == conversation_id)
    }

    pub fn error(&self) -> Option<SendError> {
        self.status.borrow().error.clone()
    }

    /// The error slot, only if it belongs to `conversation_id`
    pub fn error_for(&self, conversation_id: &str) -> Option<SendError> {
        self.error().filter(|e| e.conversation_id == conversation_id)
    }

    /// Run one send cycle against `active_id`.
    pub async fn send(
        &self,
        llm: &dyn LlmPort,
        active_id: Option<&str>,
        content: &str,
    ) -> SendOutcome {
        let Some(conversation_id) = active_id.map(str::to_string) else {
            return SendOutcome::Skipped(SkipReason::NoActiveConversation);
        };
        let content = content.trim();
        if content.is_empty() {
            return SendOutcome::Skipped(SkipReason::EmptyContent);
        }
        if self.is_sending(&conversation_id) {
            log::debug!("Send to {} ignored, a reply is still pending", conversation_id);
            return SendOutcome::Skipped(SkipReason::AlreadySending);
        }

        // Pre-send snapshot: the new user message is not part of it.
        let Some(history) = self.store.borrow().history(&conversation_id) else {
            return SendOutcome::Skipped(SkipReason::UnknownConversation);
        };

        let _cycle = self.begin_cycle(&conversation_id);
        self.store
            .borrow_mut()
            .append_message(&conversation_id, Message::user(content));

        log::info!(
            "Sending to {} with {} prior message(s)",
            conversation_id,
            history.len()
        );

        match request_completion(llm, history, content).await {
            Ok(reply) => {
                let message = Message::assistant(reply);
                let message_id = message.id.clone();
                let appended = self
                    .store
                    .borrow_mut()
                    .append_message(&conversation_id, message);
                if !appended {
                    log::info!("Reply for deleted conversation {} dropped", conversation_id);
                    return SendOutcome::Orphaned { conversation_id };
                }
                self.event_bus.emit(ChatEvent::ReplyReceived {
                    conversation_id: conversation_id.clone(),
                    message_id: message_id.clone(),
                });
                SendOutcome::Replied {
                    conversation_id,
                    message_id,
                }
            }
            Err(e) => {
                let error = e.to_string();
                log::warn!("Send to {} failed: {}", conversation_id, error);
                self.status.borrow_mut().error = Some(SendError {
                    conversation_id: conversation_id.clone(),
                    message: error.clone(),
                });
                self.event_bus.emit(ChatEvent::SendFailed {
                    conversation_id: conversation_id.clone(),
                    message: error.clone(),
                });
                SendOutcome::Failed {
                    conversation_id,
                    error,
                }
            }
        }
    }

    fn begin_cycle(&self, conversation_id: &str) -> CycleGuard {
        {
            let mut status = self.status.borrow_mut();
            status.error = None;
            status.in_flight.push(conversation_id.to_string());
        }
        self.event_bus.emit(ChatEvent::SendStarted {
            conversation_id: conversation_id.to_string(),
        });
        CycleGuard {
            status: self.status.clone(),
            event_bus: self.event_bus.clone(),
            conversation_id: conversation_id.to_string(),
        }
    }
}

/// Leaves the Sending state on drop, so the transition back to Idle also
/// happens when the send future is abandoned mid-flight.
struct CycleGuard {
    status: Rc<RefCell<SendStatus>>,
    event_bus: EventBus,
    conversation_id: String,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.status
            .borrow_mut()
            .in_flight
            .retain(|id| id != &self.conversation_id);
        self.event_bus.emit(ChatEvent::SendFinished {
            conversation_id: self.conversation_id.clone(),
        });
    }
}
