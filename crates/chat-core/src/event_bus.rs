//! Buffered event queue between the core and the UI.
//!
//! Single-threaded (WASM constraint), shared through `Rc<RefCell<_>>`.
//! The UI drains it once per frame. The queue is bounded so a surface that
//! never drains (headless use, tests) cannot grow it without limit; the
//! oldest events are discarded first.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use chat_types::event::ChatEvent;

pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ChatEvent>>>,
    capacity: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    pub fn emit(&self, event: ChatEvent) {
        let mut queue = self.inner.borrow_mut();
        if queue.len() == self.capacity {
            if let Some(dropped) = queue.pop_front() {
                log::debug!("event queue full, dropping {:?}", dropped);
            }
        }
        queue.push_back(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.inner.borrow().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
