//! Reusable UI components
//!
//! Standalone widgets shared by the labeling panels.

use crate::theme;
use eframe::egui;

/// Caption under a history thumbnail
pub fn history_label_text(label: i64) -> String {
    format!("Label: {}", label)
}

/// Score as a percentage for plot hover text
pub fn format_accuracy(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Small uppercase section title with an icon
pub fn section_title(ui: &mut egui::Ui, icon: &str, title: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(format!("{}  {}", icon, title.to_uppercase()))
                .size(theme::FONT_SECTION)
                .color(theme::TEXT_DIM),
        )
        .selectable(false),
    );
}

/// Square pixel-art view of a digit, or a placeholder when there is nothing to show.
pub fn digit_image(ui: &mut egui::Ui, texture: Option<&egui::TextureHandle>, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let painter = ui.painter();
    painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_INPUT);
    match texture {
        Some(texture) => {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        }
        None => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::IMAGE_BROKEN,
                egui::FontId::proportional(size * 0.3),
                theme::TEXT_DIM,
            );
        }
    }
    painter.rect_stroke(
        rect,
        theme::RADIUS_DEFAULT,
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT),
        egui::StrokeKind::Inside,
    );
    response
}

/// One labeled sample: thumbnail above its label.
pub fn history_card(ui: &mut egui::Ui, texture: Option<&egui::TextureHandle>, label: i64) {
    theme::card_frame().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            digit_image(ui, texture, theme::HISTORY_THUMB_SIZE);
            ui.add_space(theme::SPACING_SM);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(history_label_text(label))
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_SECONDARY),
                )
                .selectable(false),
            );
        });
    });
}
