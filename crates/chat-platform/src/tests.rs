#[cfg(test)]
mod tests {
    use crate::llm::{build_request_body, parse_completion_body};
    use crate::storage::{open_storage, MemoryStorage};
    use chat_core::completion::build_request;
    use chat_core::persistence::Persistence;
    use chat_core::ports::StoragePort;
    use chat_types::config::StorageBackendType;
    use chat_types::conversation::Conversation;
    use chat_types::message::ChatTurn;
    use chat_types::ChatError;
    use std::rc::Rc;

    // ─── MemoryStorage Tests ─────────────────────────────────

    #[test]
    fn test_memory_storage_backend_name() {
        assert_eq!(MemoryStorage::new().backend_name(), "memory");
    }

    #[test]
    fn test_memory_storage_set_get_overwrite() {
        let storage = MemoryStorage::new();
        assert!(storage.get("k").unwrap().is_none());
        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("v2".to_string()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_memory_storage_delete() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        storage.delete("k").unwrap();
        assert!(storage.get("k").unwrap().is_none());
        storage.delete("never-there").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_open_storage_falls_back_natively() {
        assert_eq!(open_storage(&StorageBackendType::Memory).backend_name(), "memory");
        assert_eq!(open_storage(&StorageBackendType::Auto).backend_name(), "memory");
        assert_eq!(open_storage(&StorageBackendType::LocalStorage).backend_name(), "memory");
    }

    #[test]
    fn test_persistence_over_memory_storage() {
        let storage: Rc<dyn StoragePort> = Rc::new(MemoryStorage::new());
        let persistence = Persistence::new(storage.clone(), "chat");
        let conversations = vec![Conversation::new("c1", "Conversation 1")];
        persistence.save(&conversations).unwrap();

        assert!(storage.get("chat:conversations").unwrap().is_some());
        assert_eq!(persistence.load(), conversations);
    }

    // ─── Request Body Tests ──────────────────────────────────

    #[test]
    fn test_request_body_shape() {
        let req = build_request(
            vec![ChatTurn::user("Hi"), ChatTurn::assistant("Hello!")],
            "How are you?",
        );
        let body = build_request_body("gpt-4", &req);

        assert_eq!(body["model"], "gpt-4");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[1]["content"], "Hello!");
        assert_eq!(messages[2]["content"], "How are you?");
        assert_eq!(body.as_object().unwrap().len(), 2);
        assert_eq!(messages[0].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_request_body_first_turn() {
        let body = build_request_body("deepseek-chat", &build_request(Vec::new(), "hello"));
        assert_eq!(
            body,
            serde_json::json!({
                "model": "deepseek-chat",
                "messages": [{"role": "user", "content": "hello"}],
            })
        );
    }

    // ─── Response Parsing Tests ──────────────────────────────

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "First"}},
                {"index": 1, "message": {"role": "assistant", "content": "Second"}}
            ],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
        }"#;
        assert_eq!(parse_completion_body(body).unwrap(), "First");
    }

    #[test]
    fn test_parse_empty_choices_fails() {
        let err = parse_completion_body(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, ChatError::Completion(_)));
    }

    #[test]
    fn test_parse_missing_choices_fails() {
        let err = parse_completion_body(r#"{"error": {"message": "nope"}}"#).unwrap_err();
        assert!(err.to_string().contains("no reply"));
    }

    #[test]
    fn test_parse_null_content_fails() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        assert!(parse_completion_body(body).is_err());
    }

    #[test]
    fn test_parse_blank_content_fails() {
        for content in ["", "   ", "\n\t"] {
            let body = serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            })
            .to_string();
            let err = parse_completion_body(&body).unwrap_err();
            assert!(matches!(err, ChatError::Completion(_)));
            assert!(err.to_string().contains("no reply"));
        }
    }

    #[test]
    fn test_parse_keeps_surrounding_whitespace() {
        let body = r#"{"choices": [{"message": {"content": "  padded  "}}]}"#;
        assert_eq!(parse_completion_body(body).unwrap(), "  padded  ");
    }

    #[test]
    fn test_parse_invalid_json_fails() {
        let err = parse_completion_body("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ChatError::Completion(_)));
        assert!(err.to_string().contains("Malformed"));
    }

    #[test]
    fn test_parse_missing_message_fails() {
        assert!(parse_completion_body(r#"{"choices": [{"index": 0}]}"#).is_err());
    }
}
