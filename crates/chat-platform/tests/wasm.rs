//! WASM-target tests for chat-platform.
//!
//! MemoryStorage tests run under `wasm-pack test --node`;
//! LocalStorage needs a browser (`wasm-pack test --headless --firefox`).

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use chat_core::persistence::Persistence;
use chat_core::ports::StoragePort;
use chat_platform::storage::{LocalStorage, MemoryStorage};
use chat_types::conversation::Conversation;
use chat_types::message::Message;
use std::rc::Rc;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_set_and_get() {
    let storage = MemoryStorage::new();
    storage.set("key1", "value1").unwrap();
    assert_eq!(storage.get("key1").unwrap(), Some("value1".to_string()));
}

#[wasm_bindgen_test]
fn memory_storage_large_value() {
    let storage = MemoryStorage::new();
    let large = "x".repeat(100_000);
    storage.set("large", &large).unwrap();
    assert_eq!(storage.get("large").unwrap().unwrap().len(), 100_000);
}

// ─── LocalStorage Tests (browser only) ───────────────────

mod browser {
    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_roundtrip() {
        let storage = LocalStorage::open().unwrap();
        storage.set("chat-test:key", "value").unwrap();
        assert_eq!(storage.get("chat-test:key").unwrap(), Some("value".to_string()));
        storage.delete("chat-test:key").unwrap();
        assert!(storage.get("chat-test:key").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn local_storage_persists_conversations() {
        let storage: Rc<dyn StoragePort> = Rc::new(LocalStorage::open().unwrap());
        let persistence = Persistence::new(storage.clone(), "chat-test");

        let mut conv = Conversation::new("c1", "Conversation 1");
        conv.messages.push(Message::user("stored in the browser"));
        persistence.save(&[conv.clone()]).unwrap();

        assert_eq!(persistence.load(), vec![conv]);
        storage.delete(&persistence.conversations_key()).unwrap();
    }

    #[wasm_bindgen_test]
    fn local_storage_malformed_loads_empty() {
        let storage: Rc<dyn StoragePort> = Rc::new(LocalStorage::open().unwrap());
        let persistence = Persistence::new(storage.clone(), "chat-test-bad");
        storage.set(&persistence.conversations_key(), "not json").unwrap();

        assert!(persistence.load().is_empty());
        storage.delete(&persistence.conversations_key()).unwrap();
    }
}
