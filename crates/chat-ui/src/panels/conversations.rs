//! Conversation sidebar — new chat, list with selection, inline rename, delete.

use egui::{self, Key, RichText, ScrollArea, Vec2};
use chat_types::conversation::Conversation;
use crate::state::{UiIntent, UiState};
use crate::theme::{self, ACCENT, ERROR, PANEL_PADDING, PANEL_ROUNDING, WARNING};

/// Render the sidebar. Returns every intent raised this frame.
pub fn conversations_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    conversations: &[Conversation],
    active_id: Option<&str>,
) -> Vec<UiIntent> {
    let mut intents = Vec::new();
    let palette = theme::current(ui);

    egui::Frame::default()
        .fill(palette.bg_secondary)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            let width = ui.available_width();
            let new_chat = ui.add(
                egui::Button::new(RichText::new("New Chat").color(egui::Color32::WHITE).strong())
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(width, 30.0)),
            );
            if new_chat.clicked() {
                intents.push(UiIntent::NewConversation);
            }

            ui.add_space(8.0);

            let list_height = ui.available_height() - 80.0;
            ScrollArea::vertical()
                .max_height(list_height)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for conv in conversations {
                        if state.is_renaming(&conv.id) {
                            rename_row(ui, state, &mut intents);
                        } else {
                            conversation_row(ui, state, conv, active_id, &mut intents);
                        }
                        ui.add_space(2.0);
                    }
                });

            ui.separator();

            if let Some(warning) = &state.persistence_warning {
                ui.label(
                    RichText::new(format!("Not saved: {}", warning))
                        .color(WARNING)
                        .small(),
                );
            }

            ui.horizontal(|ui| {
                if ui.button(state.theme_toggle_label()).clicked() {
                    intents.push(UiIntent::ToggleTheme);
                }
                if ui.button("Settings").clicked() {
                    state.show_settings = !state.show_settings;
                }
            });
        });

    intents
}

fn conversation_row(
    ui: &mut egui::Ui,
    state: &mut UiState,
    conv: &Conversation,
    active_id: Option<&str>,
    intents: &mut Vec<UiIntent>,
) {
    let selected = active_id == Some(conv.id.as_str());
    ui.horizontal(|ui| {
        if ui.selectable_label(selected, conv.title.as_str()).clicked() {
            intents.push(UiIntent::Select(conv.id.clone()));
        }
        if ui.small_button("Rename").clicked() {
            state.begin_rename(&conv.id, &conv.title);
        }
        if ui
            .small_button(RichText::new("Delete").color(ERROR))
            .clicked()
        {
            intents.push(UiIntent::Delete(conv.id.clone()));
        }
    });
}

fn rename_row(ui: &mut egui::Ui, state: &mut UiState, intents: &mut Vec<UiIntent>) {
    let Some(draft) = state.rename.as_mut() else {
        return;
    };

    let width = ui.available_width();
    let response = ui.add(egui::TextEdit::singleline(&mut draft.title).desired_width(width));
    if draft.focus_pending {
        response.request_focus();
        draft.focus_pending = false;
    }

    // Enter and clicking away both end the edit; Escape discards it.
    if response.lost_focus() {
        if ui.input(|i| i.key_pressed(Key::Escape)) {
            state.cancel_rename();
        } else if let Some(intent) = state.commit_rename() {
            intents.push(intent);
        }
    }
}
