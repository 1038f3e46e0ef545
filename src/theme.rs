//! Black background, white stars, grey overlay text

use egui::Color32;

pub mod colors {
    use super::Color32;

    pub const BG_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);           // #000000 - night sky
    pub const BG_OVERLAY: Color32 = Color32::from_rgba_premultiplied(12, 12, 12, 200);

    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160); // #A0A0A0
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(80, 80, 80);        // #505050
}

/// White with the given opacity in [0, 1]
pub fn white(opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(255, 255, 255, alpha)
}

/// Dark egui visuals with no panel chrome
pub fn minimal_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_PRIMARY;
    visuals.extreme_bg_color = BG_PRIMARY;
    visuals.override_text_color = Some(TEXT_SECONDARY);
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;
    visuals
}
