//! Pick a storage backend from configuration.
//!
//! Priority for `Auto`: localStorage → Memory (fallback).
//! Outside the browser only the memory backend exists.

use std::rc::Rc;
use chat_core::ports::StoragePort;
use chat_types::config::StorageBackendType;
use super::MemoryStorage;

/// Open the requested backend, degrading to memory when it is unavailable.
/// Returns a trait object so callers are backend-agnostic.
pub fn open_storage(backend: &StorageBackendType) -> Rc<dyn StoragePort> {
    match backend {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Rc::new(MemoryStorage::new())
        }
        StorageBackendType::Auto | StorageBackendType::LocalStorage => open_durable(),
    }
}

#[cfg(target_arch = "wasm32")]
fn open_durable() -> Rc<dyn StoragePort> {
    match super::LocalStorage::open() {
        Ok(local) => {
            log::info!("Storage backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryStorage::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_durable() -> Rc<dyn StoragePort> {
    log::warn!("No durable storage on this target, falling back to memory");
    Rc::new(MemoryStorage::new())
}
