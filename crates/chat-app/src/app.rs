//! Main egui application — composes the panels and drives the send cycle.

use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use chat_core::event_bus::EventBus;
use chat_core::orchestrator::SendOrchestrator;
use chat_core::persistence::Persistence;
use chat_core::ports::{LlmPort, StoragePort};
use chat_core::store::{ConversationStore, SharedStore};
use chat_platform::llm::OpenAiCompatProvider;
use chat_platform::storage::open_storage;
use chat_types::config::{ChatConfig, StorageBackendType, DEFAULT_NAMESPACE};
use chat_ui::panels::chat::{self, ChatView};
use chat_ui::panels::settings::{self, SaveFeedback, SettingsAction};
use chat_ui::panels::conversations;
use chat_ui::state::{UiIntent, UiState};
use chat_ui::theme;

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    /// Settings as edited in the panel; applied on Save
    config: ChatConfig,
    /// Where the config itself lives, independent of the chosen backend
    config_store: Persistence,
    event_bus: EventBus,
    store: SharedStore,
    orchestrator: SendOrchestrator,
    llm: Rc<dyn LlmPort>,
    save_feedback: Option<SaveFeedback>,
    applied_theme: Option<bool>,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let bootstrap = open_storage(&StorageBackendType::Auto);
        let config_store = Persistence::new(bootstrap.clone(), DEFAULT_NAMESPACE);
        let config = config_store.load_config();

        let storage: Rc<dyn StoragePort> = match config.storage.backend {
            StorageBackendType::Auto => bootstrap,
            ref backend => open_storage(backend),
        };
        let persistence = Persistence::new(storage, config.storage.namespace.clone());
        log::info!(
            "Conversations stored in {} under {}",
            persistence.backend_name(),
            persistence.conversations_key()
        );

        let event_bus = EventBus::new();
        let store = ConversationStore::load(persistence, event_bus.clone()).into_shared();
        let orchestrator = SendOrchestrator::new(store.clone(), event_bus.clone());
        let llm: Rc<dyn LlmPort> = Rc::new(OpenAiCompatProvider::new(config.llm.clone()));

        Self {
            ui_state: UiState::new(),
            config,
            config_store,
            event_bus,
            store,
            orchestrator,
            llm,
            save_feedback: None,
            applied_theme: None,
        }
    }

    fn rebuild_llm(&mut self) {
        self.llm = Rc::new(OpenAiCompatProvider::new(self.config.llm.clone()));
    }

    fn save_settings(&mut self) {
        self.rebuild_llm();
        self.save_feedback = Some(match self.config_store.save_config(&self.config) {
            Ok(()) => {
                log::info!("Config saved to {}", self.config_store.config_key());
                SaveFeedback::saved()
            }
            Err(e) => {
                log::error!("Config save failed: {}", e);
                SaveFeedback::failed(e)
            }
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_theme != Some(self.ui_state.dark_theme) {
            theme::apply_theme(ctx, self.ui_state.dark_theme);
            self.applied_theme = Some(self.ui_state.dark_theme);
        }

        // Drain events from the store and send cycles
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            let last_error = self.store.borrow().last_persist_error().map(str::to_string);
            self.ui_state.sync_persistence(last_error.as_deref());
            ctx.request_repaint();
        }

        if self.orchestrator.is_loading() {
            ctx.request_repaint();
        }

        let mut intents = Vec::new();

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("ChatBot").strong().color(theme::ACCENT).size(16.0));
                ui.separator();
                ui.label(
                    RichText::new(format!(
                        "Provider: {} | Model: {}",
                        self.config.llm.provider.label(),
                        self.config.llm.model
                    ))
                    .color(theme::current(ui).text_secondary)
                    .small(),
                );
            });
        });

        // ── Conversation sidebar ─────────────────────────────
        SidePanel::left("conversations_panel")
            .min_width(220.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                let store = self.store.borrow();
                intents.extend(conversations::conversations_panel(
                    ui,
                    &mut self.ui_state,
                    store.conversations(),
                    store.active_id(),
                ));
            });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    let feedback = self.save_feedback.clone();
                    match settings::settings_panel(ui, &mut self.config, feedback.as_ref()) {
                        SettingsAction::SaveClicked => self.save_settings(),
                        SettingsAction::Changed => self.save_feedback = None,
                        SettingsAction::None => {}
                    }
                });
        }

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            let store = self.store.borrow();
            let conversation = store.active_conversation();
            let sending = conversation.is_some_and(|c| self.orchestrator.is_sending(&c.id));
            let error = conversation.and_then(|c| self.orchestrator.error_for(&c.id));
            let view = ChatView {
                conversation,
                sending,
                error: error.as_ref().map(|e| e.message.as_str()),
            };
            if let Some(intent) = chat::chat_panel(ui, &mut self.ui_state, view) {
                intents.push(intent);
            }
        });

        for intent in intents {
            self.dispatch(intent, ctx);
        }
    }
}

impl ChatApp {
    /// Apply one UI intent. Store borrows end before any send is spawned.
    fn dispatch(&mut self, intent: UiIntent, ctx: &egui::Context) {
        match intent {
            UiIntent::NewConversation => {
                self.store.borrow_mut().create_conversation();
            }
            UiIntent::Select(id) => self.store.borrow_mut().select_conversation(&id),
            UiIntent::Delete(id) => {
                self.ui_state.forget_conversation(&id);
                self.store.borrow_mut().delete_conversation(&id);
            }
            UiIntent::Rename(id, title) => {
                self.store.borrow_mut().rename_conversation(&id, &title)
            }
            UiIntent::Send(text) => self.dispatch_send(text, ctx),
            UiIntent::ToggleTheme => self.ui_state.toggle_theme(),
        }
        ctx.request_repaint();
    }

    /// Run a send cycle in the background against the conversation active right now
    fn dispatch_send(&self, text: String, ctx: &egui::Context) {
        let active_id = self.store.borrow().active_id().map(str::to_string);
        let orchestrator = self.orchestrator.clone();
        let llm = self.llm.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = orchestrator
                .send(llm.as_ref(), active_id.as_deref(), &text)
                .await;
            log::debug!("Send finished: {:?}", outcome);
            ctx.request_repaint();
        });
    }
}
