//! UI-level state that drives rendering.
//! Conversation data lives in the store; this only holds what the
//! widgets own (input buffers, rename drafts, toggles) plus per-conversation
//! status lines updated each frame by draining the EventBus.

use std::collections::HashMap;

use chat_types::event::ChatEvent;

const READY: &str = "Ready";

/// What the user asked for this frame. Dispatched by the app layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    NewConversation,
    Select(String),
    Delete(String),
    Rename(String, String),
    Send(String),
    ToggleTheme,
}

/// An in-progress inline rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDraft {
    pub conversation_id: String,
    pub title: String,
    /// The edit field grabs focus on the first frame it is shown
    pub focus_pending: bool,
}

/// State visible to UI panels
pub struct UiState {
    /// Message input field content
    pub input_text: String,
    pub rename: Option<RenameDraft>,
    pub dark_theme: bool,
    /// Whether settings panel is open
    pub show_settings: bool,
    /// Status line per conversation; absent means ready
    statuses: HashMap<String, String>,
    /// Last failed save, shown until the next successful write
    pub persistence_warning: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            rename: None,
            dark_theme: false,
            show_settings: false,
            statuses: HashMap::new(),
            persistence_warning: None,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::SendStarted { conversation_id } => {
                    self.statuses
                        .insert(conversation_id, "Thinking...".to_string());
                }
                ChatEvent::ReplyReceived { conversation_id, .. }
                | ChatEvent::SendFinished { conversation_id } => {
                    let failed = self
                        .statuses
                        .get(&conversation_id)
                        .is_some_and(|s| s.starts_with("Error"));
                    if !failed {
                        self.statuses.remove(&conversation_id);
                    }
                }
                ChatEvent::SendFailed { conversation_id, message } => {
                    self.statuses
                        .insert(conversation_id, format!("Error: {}", message));
                }
                ChatEvent::PersistenceFailed { message } => {
                    self.persistence_warning = Some(message);
                }
                ChatEvent::ConversationsChanged => {}
            }
        }
    }

    /// Status line for one conversation
    pub fn status_for(&self, conversation_id: &str) -> &str {
        self.statuses
            .get(conversation_id)
            .map(String::as_str)
            .unwrap_or(READY)
    }

    /// Drop per-conversation UI state for a deleted conversation
    pub fn forget_conversation(&mut self, conversation_id: &str) {
        self.statuses.remove(conversation_id);
        if self.is_renaming(conversation_id) {
            self.cancel_rename();
        }
    }

    /// Mirror the store's persistence state; a later successful save clears the warning.
    pub fn sync_persistence(&mut self, last_error: Option<&str>) {
        self.persistence_warning = last_error.map(str::to_string);
    }

    pub fn begin_rename(&mut self, conversation_id: &str, current_title: &str) {
        self.rename = Some(RenameDraft {
            conversation_id: conversation_id.to_string(),
            title: current_title.to_string(),
            focus_pending: true,
        });
    }

    pub fn is_renaming(&self, conversation_id: &str) -> bool {
        self.rename
            .as_ref()
            .is_some_and(|d| d.conversation_id == conversation_id)
    }

    /// Close the draft. Yields a rename intent unless the title is blank.
    pub fn commit_rename(&mut self) -> Option<UiIntent> {
        let draft = self.rename.take()?;
        let title = draft.title.trim();
        if title.is_empty() {
            return None;
        }
        Some(UiIntent::Rename(draft.conversation_id, title.to_string()))
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    pub fn toggle_theme(&mut self) {
        self.dark_theme = !self.dark_theme;
    }

    /// Take the trimmed input for sending, leaving the field empty.
    /// Blank input stays in place and yields nothing.
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input_text.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.input_text.clear();
        Some(text)
    }

    pub fn theme_toggle_label(&self) -> &'static str {
        if self.dark_theme {
            "Switch to Light Theme"
        } else {
            "Switch to Dark Theme"
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Local wall-clock time for a message timestamp (epoch millis)
pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|utc| {
            utc.with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}
