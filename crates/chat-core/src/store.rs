//! Conversation store — the authoritative conversation collection and the
//! active-conversation pointer.
//!
//! Every mutation that takes effect is written through [`Persistence`]
//! before the call returns. Write failures are logged, kept in
//! [`ConversationStore::last_persist_error`] and announced on the event bus;
//! the in-memory state is kept either way.

use std::cell::RefCell;
use std::rc::Rc;

use chat_types::{
    conversation::Conversation,
    event::ChatEvent,
    id::generate_id,
    message::{ChatTurn, Message},
};
use crate::event_bus::EventBus;
use crate::persistence::Persistence;

/// The store as shared between the UI and in-flight sends
pub type SharedStore = Rc<RefCell<ConversationStore>>;

pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    persistence: Persistence,
    event_bus: EventBus,
    last_persist_error: Option<String>,
}

impl ConversationStore {
    /// Build the store from whatever the persistence layer holds.
    /// Nothing is active after load.
    pub fn load(persistence: Persistence, event_bus: EventBus) -> Self {
        let conversations = persistence.load();
        log::info!(
            "Loaded {} conversation(s) from {}",
            conversations.len(),
            persistence.backend_name()
        );
        Self {
            conversations,
            active_id: None,
            persistence,
            event_bus,
            last_persist_error: None,
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    // ─── Queries ─────────────────────────────────────────────

    /// All conversations in creation order
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Transcript of the active conversation, empty when nothing is active
    pub fn active_messages(&self) -> &[Message] {
        self.active_conversation()
            .map(|c| c.messages.as_slice())
            .unwrap_or(&[])
    }

    /// Role/content snapshot of a conversation's current transcript
    pub fn history(&self, id: &str) -> Option<Vec<ChatTurn>> {
        self.get(id).map(Conversation::history)
    }

    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    // ─── Mutations ───────────────────────────────────────────

    /// Create an empty conversation titled after the current count and make
    /// it active.
    pub fn create_conversation(&mut self) -> Conversation {
        let mut id = generate_id();
        while self.contains(&id) {
            id = generate_id();
        }
        let conversation = Conversation::new(id, Conversation::default_title(self.conversations.len()));
        self.conversations.push(conversation.clone());
        self.active_id = Some(conversation.id.clone());
        log::debug!("Created conversation {}", conversation.id);
        self.commit();
        conversation
    }

    /// Remove a conversation. Clears the active pointer if it pointed here.
    pub fn delete_conversation(&mut self, id: &str) {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id != id);
        if self.conversations.len() == before {
            return;
        }
        if self.active_id.as_deref() == Some(id) {
            self.active_id = None;
        }
        log::debug!("Deleted conversation {}", id);
        self.commit();
    }

    /// Set the trimmed title; blank titles are ignored.
    pub fn rename_conversation(&mut self, id: &str, new_title: &str) {
        let title = new_title.trim();
        if title.is_empty() {
            return;
        }
        let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) else {
            return;
        };
        conversation.title = title.to_string();
        self.commit();
    }

    /// Point the active pointer at `id`.
    pub fn select_conversation(&mut self, id: &str) {
        self.active_id = Some(id.to_string());
        self.commit();
    }

    /// Append to the named conversation. Returns false (and changes nothing)
    /// when it does not exist.
    pub fn append_message(&mut self, conversation_id: &str, message: Message) -> bool {
        let Some(conversation) = self
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
        else {
            log::debug!("Dropping message for unknown conversation {}", conversation_id);
            return false;
        };
        conversation.messages.push(message);
        self.commit();
        true
    }

    fn commit(&mut self) {
        match self.persistence.save(&self.conversations) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                let message = e.to_string();
                log::error!("Failed to persist conversations: {}", message);
                self.event_bus.emit(ChatEvent::PersistenceFailed {
                    message: message.clone(),
                });
                self.last_persist_error = Some(message);
            }
        }
        self.event_bus.emit(ChatEvent::ConversationsChanged);
    }
}
