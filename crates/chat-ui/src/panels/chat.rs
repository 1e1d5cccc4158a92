//! Chat panel — welcome screen, transcript of the active conversation, input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use chat_types::conversation::Conversation;
use chat_types::message::{Message, Role};
use crate::state::{format_timestamp, UiIntent, UiState};
use crate::theme::{self, Palette, ACCENT, ERROR, PANEL_PADDING, PANEL_ROUNDING, SUCCESS, WARNING};

/// What the chat panel needs to know about the store and send cycle
pub struct ChatView<'a> {
    pub conversation: Option<&'a Conversation>,
    /// A send to the shown conversation is in flight
    pub sending: bool,
    pub error: Option<&'a str>,
}

/// Render the chat panel. Returns an intent when the user submits input
/// or starts a chat from the welcome screen.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, view: ChatView<'_>) -> Option<UiIntent> {
    let palette = theme::current(ui);
    let mut intent = None;

    egui::Frame::default()
        .fill(palette.bg_primary)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| match view.conversation {
            None => {
                if welcome_screen(ui, palette) {
                    intent = Some(UiIntent::NewConversation);
                }
            }
            Some(conv) => {
                intent = conversation_view(ui, state, palette, conv, &view);
            }
        });

    intent
}

/// Returns true when "Start New Chat" is clicked
fn welcome_screen(ui: &mut egui::Ui, palette: &Palette) -> bool {
    let mut clicked = false;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.heading(
            RichText::new("Welcome to ChatBot")
                .color(palette.text_primary)
                .strong(),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new("Start a new conversation or select an existing one.")
                .color(palette.text_secondary),
        );
        ui.add_space(12.0);
        let button = ui.add(
            egui::Button::new(RichText::new("Start New Chat").color(egui::Color32::WHITE))
                .fill(ACCENT)
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(140.0, 32.0)),
        );
        clicked = button.clicked();
    });
    clicked
}

fn conversation_view(
    ui: &mut egui::Ui,
    state: &mut UiState,
    palette: &Palette,
    conv: &Conversation,
    view: &ChatView<'_>,
) -> Option<UiIntent> {
    let mut intent = None;

    ui.vertical(|ui| {
        // Header
        ui.horizontal(|ui| {
            ui.heading(RichText::new(&conv.title).color(palette.text_primary).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let status_color = if view.sending { WARNING } else { SUCCESS };
                ui.label(RichText::new(state.status_for(&conv.id)).color(status_color).small());
            });
        });

        ui.separator();

        let available_height = ui.available_height() - 60.0;
        ScrollArea::vertical()
            .max_height(available_height)
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for message in &conv.messages {
                    render_message(ui, palette, message);
                    ui.add_space(4.0);
                }

                if view.sending {
                    ui.label(
                        RichText::new("Thinking...")
                            .color(palette.text_secondary)
                            .italics(),
                    );
                }
                if let Some(error) = view.error {
                    ui.label(RichText::new(format!("Error: {}", error)).color(ERROR));
                }
            });

        ui.add_space(8.0);

        // Input area
        ui.horizontal(|ui| {
            let input = egui::TextEdit::singleline(&mut state.input_text)
                .hint_text("Type a message...")
                .desired_width(ui.available_width() - 90.0)
                .font(egui::FontId::proportional(14.0));
            let response = ui.add_enabled(!view.sending, input);

            let send_enabled = !state.input_text.trim().is_empty() && !view.sending;
            let label = if view.sending { "Sending..." } else { "Send" };
            let send_btn = ui.add_enabled(
                send_enabled,
                egui::Button::new(RichText::new(label).color(palette.text_primary))
                    .fill(if send_enabled { ACCENT } else { palette.bg_surface })
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(80.0, 0.0)),
            );

            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if send_enabled && (enter || send_btn.clicked()) {
                if let Some(text) = state.take_input() {
                    intent = Some(UiIntent::Send(text));
                }
                response.request_focus();
            }
        });
    });

    intent
}

fn render_message(ui: &mut egui::Ui, palette: &Palette, message: &Message) {
    let (label, label_color, bg) = match message.role {
        Role::User => ("You", ACCENT, palette.user_bubble),
        Role::Assistant => ("Assistant", SUCCESS, palette.assistant_bubble),
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(label).color(label_color).strong().small());
                ui.label(
                    RichText::new(format_timestamp(message.timestamp))
                        .color(palette.text_secondary)
                        .small(),
                );
            });
            ui.label(RichText::new(&message.content).color(palette.text_primary));
        });
}
