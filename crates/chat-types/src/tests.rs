#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::conversation::*;
    use crate::event::*;
    use crate::config::*;
    use crate::error::*;
    use crate::id::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(!msg.id.is_empty());
        assert!(msg.timestamp > 0);
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("I can help");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "I can help");
    }

    #[test]
    fn test_messages_get_distinct_ids() {
        let a = Message::user("one");
        let b = Message::user("two");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_to_turn_strips_metadata() {
        let msg = Message::assistant("reply");
        let turn = msg.to_turn();
        assert_eq!(turn, ChatTurn::assistant("reply"));

        let json = serde_json::to_value(&turn).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_role_rejects_unknown() {
        let result: Result<Role, _> = serde_json::from_str(r#""system""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_message_field_names() {
        let msg = Message {
            id: "m1".to_string(),
            content: "hi".to_string(),
            role: Role::User,
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["id"], "m1");
        assert_eq!(json["content"], "hi");
        assert_eq!(json["role"], "user");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    // ─── Conversation Tests ──────────────────────────────────

    #[test]
    fn test_conversation_new_is_empty() {
        let conv = Conversation::new("c1", "Conversation 1");
        assert_eq!(conv.id, "c1");
        assert_eq!(conv.title, "Conversation 1");
        assert!(conv.messages.is_empty());
        assert!(conv.last_message().is_none());
    }

    #[test]
    fn test_default_title_uses_count_plus_one() {
        assert_eq!(Conversation::default_title(0), "Conversation 1");
        assert_eq!(Conversation::default_title(4), "Conversation 5");
    }

    #[test]
    fn test_conversation_history_preserves_order() {
        let mut conv = Conversation::new("c1", "t");
        conv.messages.push(Message::user("q1"));
        conv.messages.push(Message::assistant("a1"));
        conv.messages.push(Message::user("q2"));

        let history = conv.history();
        assert_eq!(
            history,
            vec![ChatTurn::user("q1"), ChatTurn::assistant("a1"), ChatTurn::user("q2")]
        );
        assert_eq!(conv.last_message().unwrap().content, "q2");
    }

    #[test]
    fn test_conversation_deserializes_stored_shape() {
        let json = r#"{
            "id": "1700000000000",
            "title": "Trip planning",
            "messages": [
                {"id": "1700000000001", "content": "Where to?", "role": "user", "timestamp": 1700000000001},
                {"id": "1700000000002", "content": "Lisbon.", "role": "assistant", "timestamp": 1700000000002}
            ]
        }"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.title, "Trip planning");
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[1].role, Role::Assistant);
        assert_eq!(conv.messages[1].timestamp, 1_700_000_000_002);
    }

    // ─── Id Tests ────────────────────────────────────────────

    #[test]
    fn test_generate_id_is_time_stamped() {
        let before = now_millis();
        let id = generate_id();
        let (stamp, suffix) = id.split_once('-').unwrap();
        let stamp: i64 = stamp.parse().unwrap();
        assert!(stamp >= before);
        assert_eq!(suffix.len(), 8);
    }

    #[test]
    fn test_generate_id_unique_in_burst() {
        let ids: std::collections::HashSet<String> = (0..500).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 500);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.llm.provider, LlmProvider::OpenAI);
        assert_eq!(config.llm.model, "gpt-4");
        assert!(config.llm.api_key.is_empty());
        assert_eq!(config.llm.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
        assert_eq!(config.storage.namespace, "chat");
    }

    #[test]
    fn test_completions_url_uses_provider_default() {
        let config = LlmConfig::default();
        assert_eq!(config.completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_completions_url_override_trims_slash() {
        let config = LlmConfig {
            api_base: Some("http://localhost:8080/".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_blank_override_falls_back() {
        let config = LlmConfig {
            provider: LlmProvider::DeepSeek,
            api_base: Some("   ".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(config.base_url(), "https://api.deepseek.com");
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = LlmConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_validate_custom_requires_base() {
        let config = LlmConfig {
            provider: LlmProvider::Custom,
            api_key: "sk-test".to_string(),
            ..LlmConfig::default()
        };
        assert!(config.validate().is_err());

        let config = LlmConfig {
            api_base: Some("http://localhost:1234".to_string()),
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = LlmConfig {
            api_key: "sk-test".to_string(),
            request_timeout_ms: 0,
            ..LlmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_loads_partial_json() {
        let config: ChatConfig =
            serde_json::from_str(r#"{"llm": {"model": "gpt-4o-mini"}}"#).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.provider, LlmProvider::OpenAI);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_provider_labels() {
        for p in LlmProvider::all() {
            assert!(!p.label().is_empty());
        }
        assert_eq!(LlmProvider::Custom.default_base_url(), "");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_event_serialization_roundtrip() {
        let event = ChatEvent::SendFailed {
            conversation_id: "c1".to_string(),
            message: "HTTP 500".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: ChatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(
            ChatError::Completion("bad".to_string()).to_string(),
            "Completion failed: bad"
        );
        assert_eq!(ChatError::Timeout(5000).to_string(), "Request timed out after 5000ms");
        assert_eq!(
            ChatError::Storage("quota".to_string()).to_string(),
            "Storage error: quota"
        );
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: ChatError = serde_json::from_str::<serde_json::Value>("{{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
