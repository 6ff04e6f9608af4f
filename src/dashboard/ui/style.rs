use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::dashboard::render::CellTone;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_ice: Color32,
    pub accent_copper: Color32,
    pub warning: Color32,
    pub success: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(10, 10, 12),
        bg_secondary: Color32::from_rgb(26, 28, 30),
        bg_tertiary: Color32::from_rgb(42, 44, 48),
        panel_outline: Color32::from_rgb(38, 42, 48),
        grid_soft: Color32::from_rgb(30, 32, 36),
        text_primary: Color32::from_rgb(185, 192, 200),
        text_muted: Color32::from_rgb(140, 146, 155),
        accent_ice: Color32::from_rgb(167, 217, 255),
        accent_copper: Color32::from_rgb(195, 165, 122),
        warning: Color32::from_rgb(200, 128, 96),
        success: Color32::from_rgb(102, 176, 136),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_ice;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.grid_soft;
    visuals.error_fg_color = palette.warning;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.grid_soft;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_ice);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rectilinear(&mut visuals.widgets.inactive, palette);
    set_rectilinear(&mut visuals.widgets.hovered, palette);
    set_rectilinear(&mut visuals.widgets.active, palette);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
}

fn set_rectilinear(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::ZERO;
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.grid_soft;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Text colour for a table cell; `None` keeps the default.
pub fn tone_color(tone: CellTone) -> Option<Color32> {
    let palette = palette();
    match tone {
        CellTone::Plain => None,
        CellTone::Success => Some(palette.success),
        CellTone::Warning => Some(palette.accent_copper),
        CellTone::Primary => Some(palette.accent_ice),
    }
}

pub fn error_text() -> Color32 {
    palette().warning
}

pub fn muted_text() -> Color32 {
    palette().text_muted
}
