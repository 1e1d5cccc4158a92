//! egui panels and the UI-side state that drives them.
//!
//! Panels never touch the store directly. They read borrowed views and
//! return [`state::UiIntent`]s for the app layer to dispatch.

pub mod panels;
pub mod state;
pub mod theme;
