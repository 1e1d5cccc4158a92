//! UI theme: a light and a dark palette over egui's base visuals

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_surface: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub user_bubble: Color32,
    pub assistant_bubble: Color32,
}

pub const DARK: Palette = Palette {
    bg_primary: Color32::from_rgb(24, 24, 27),
    bg_secondary: Color32::from_rgb(39, 39, 42),
    bg_surface: Color32::from_rgb(52, 52, 56),
    text_primary: Color32::from_rgb(228, 228, 231),
    text_secondary: Color32::from_rgb(161, 161, 170),
    user_bubble: Color32::from_rgb(49, 46, 129),
    assistant_bubble: Color32::from_rgb(39, 39, 42),
};

pub const LIGHT: Palette = Palette {
    bg_primary: Color32::from_rgb(250, 250, 250),
    bg_secondary: Color32::from_rgb(240, 240, 243),
    bg_surface: Color32::from_rgb(228, 228, 231),
    text_primary: Color32::from_rgb(24, 24, 27),
    text_secondary: Color32::from_rgb(90, 90, 100),
    user_bubble: Color32::from_rgb(224, 231, 255),
    assistant_bubble: Color32::from_rgb(240, 240, 243),
};

pub const ACCENT: Color32 = Color32::from_rgb(99, 102, 241);
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);

pub fn palette(dark: bool) -> &'static Palette {
    if dark {
        &DARK
    } else {
        &LIGHT
    }
}

/// Palette matching whatever visuals are active on this `Ui`
pub fn current(ui: &egui::Ui) -> &'static Palette {
    palette(ui.visuals().dark_mode)
}

/// Apply the light or dark theme to an egui context
pub fn apply_theme(ctx: &egui::Context, dark: bool) {
    let p = palette(dark);
    let mut style = (*ctx.style()).clone();

    style.visuals = if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    style.visuals.panel_fill = p.bg_primary;
    style.visuals.window_fill = p.bg_secondary;

    style.visuals.widgets.inactive.bg_fill = p.bg_surface;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, p.text_secondary);
    style.visuals.widgets.hovered.bg_fill = p.bg_surface;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, p.text_primary);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, p.text_primary);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
