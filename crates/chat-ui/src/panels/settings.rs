//! Settings panel — completion provider, credentials, timeout, storage mode.
//! Nothing takes effect until the explicit Save button is clicked.

use egui::{self, RichText, Vec2};
use chat_types::config::{ChatConfig, LlmProvider, StorageBackendType};
use crate::theme::{self, ACCENT, ERROR, PANEL_PADDING, PANEL_ROUNDING, SUCCESS};

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Nothing changed
    None,
    /// A field was edited but not yet saved
    Changed,
    /// The user clicked the explicit Save button
    SaveClicked,
}

/// Save feedback passed in from the app layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

impl SaveFeedback {
    pub fn saved() -> Self {
        Self {
            message: "Settings saved".to_string(),
            success: true,
        }
    }

    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Save failed: {}", reason),
            success: false,
        }
    }
}

/// Render the settings panel. Returns an action for the caller to handle.
pub fn settings_panel(
    ui: &mut egui::Ui,
    config: &mut ChatConfig,
    save_feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let palette = theme::current(ui);
    let mut changed = false;
    let mut save_clicked = false;

    egui::Frame::default()
        .fill(palette.bg_secondary)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(palette.text_primary));
            ui.separator();

            // ── Completion Section ───────────────────────────
            ui.label(RichText::new("Completion").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Provider").color(palette.text_secondary).small());
            egui::ComboBox::from_id_salt("llm_provider")
                .selected_text(config.llm.provider.label())
                .show_ui(ui, |ui| {
                    for p in LlmProvider::all() {
                        if ui
                            .selectable_value(&mut config.llm.provider, p.clone(), p.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(4.0);

            ui.label(RichText::new("Model").color(palette.text_secondary).small());
            if ui.text_edit_singleline(&mut config.llm.model).changed() {
                changed = true;
            }

            ui.add_space(4.0);

            // API Key (masked)
            ui.label(RichText::new("API Key").color(palette.text_secondary).small());
            let api_key_edit = egui::TextEdit::singleline(&mut config.llm.api_key)
                .password(true)
                .hint_text("sk-...");
            if ui.add(api_key_edit).changed() {
                changed = true;
            }

            ui.add_space(4.0);

            let base_label = if config.llm.provider == LlmProvider::Custom {
                "API Base URL"
            } else {
                "API Base URL (optional)"
            };
            ui.label(RichText::new(base_label).color(palette.text_secondary).small());
            let mut base_url = config.llm.api_base.clone().unwrap_or_default();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut base_url)
                        .hint_text(config.llm.provider.default_base_url()),
                )
                .changed()
            {
                config.llm.api_base = if base_url.trim().is_empty() {
                    None
                } else {
                    Some(base_url)
                };
                changed = true;
            }

            ui.add_space(4.0);

            ui.label(RichText::new("Request Timeout").color(palette.text_secondary).small());
            // Edited in milliseconds so any stored value is kept as-is
            if ui
                .add(
                    egui::Slider::new(&mut config.llm.request_timeout_ms, 5_000..=300_000)
                        .suffix(" ms")
                        .clamping(egui::SliderClamping::Never),
                )
                .changed()
            {
                changed = true;
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Storage Section ──────────────────────────────
            ui.label(RichText::new("Storage").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Backend").color(palette.text_secondary).small());
            egui::ComboBox::from_id_salt("storage_backend")
                .selected_text(storage_label(&config.storage.backend))
                .show_ui(ui, |ui| {
                    for backend in storage_options() {
                        let label = storage_label(&backend);
                        if ui
                            .selectable_value(&mut config.storage.backend, backend, label)
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(4.0);
            ui.label(
                RichText::new(storage_description(&config.storage.backend))
                    .color(palette.text_secondary)
                    .small()
                    .italics(),
            );

            // ── Save Button ──────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(
                        RichText::new("Save Settings")
                            .color(egui::Color32::WHITE)
                            .strong(),
                    )
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    save_clicked = true;
                }

                if let Some(fb) = save_feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(RichText::new(&fb.message).color(color).small());
                }
            });
        });

    if save_clicked {
        SettingsAction::SaveClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}

pub fn storage_label(backend: &StorageBackendType) -> &'static str {
    match backend {
        StorageBackendType::Auto => "Auto-detect",
        StorageBackendType::Memory => "Memory",
        StorageBackendType::LocalStorage => "localStorage",
    }
}

fn storage_description(backend: &StorageBackendType) -> &'static str {
    match backend {
        StorageBackendType::Auto => "Uses localStorage when the browser allows it, otherwise Memory.",
        StorageBackendType::Memory => "Volatile. Conversations are lost on page reload.",
        StorageBackendType::LocalStorage => "Conversations survive page reloads. Applies after reload.",
    }
}

fn storage_options() -> [StorageBackendType; 3] {
    [
        StorageBackendType::Auto,
        StorageBackendType::Memory,
        StorageBackendType::LocalStorage,
    ]
}
