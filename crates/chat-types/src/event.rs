use serde::{Deserialize, Serialize};

/// Events emitted by the conversation store and send orchestrator.
/// The UI drains these each frame for status updates and repaints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// The conversation collection or the active pointer changed
    ConversationsChanged,

    /// A send cycle entered the Sending state
    SendStarted { conversation_id: String },

    /// The assistant reply was appended
    ReplyReceived { conversation_id: String, message_id: String },

    /// The completion call failed; the user message stays without a reply
    SendFailed { conversation_id: String, message: String },

    /// The send cycle returned to Idle, whatever the outcome
    SendFinished { conversation_id: String },

    /// Writing the collection to storage failed
    PersistenceFailed { message: String },
}
