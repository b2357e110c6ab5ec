//! Blocking notice dialog

use super::App;
use crate::theme;
use crate::types::NoticeKind;
use eframe::egui;

impl App {
    /// Show the oldest queued notice until the user acknowledges it.
    pub(crate) fn render_notice_modal(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.controller.current_notice().cloned() else {
            self.notice_shown = false;
            return;
        };
        self.notice_shown = true;

        let (icon, color) = match notice.kind {
            NoticeKind::Info => (egui_phosphor::regular::CHECK_CIRCLE, theme::STATUS_SUCCESS),
            NoticeKind::Error => (egui_phosphor::regular::WARNING, theme::STATUS_ERROR),
        };

        let mut acknowledged = false;
        let modal_response = egui::Modal::new(egui::Id::new("notice_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(160))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(theme::MODAL_WIDTH);
                ui.vertical_centered(|ui| {
                    ui.add_space(theme::SPACING_SM);
                    ui.label(egui::RichText::new(icon).size(32.0).color(color));
                    ui.add_space(theme::SPACING_MD);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&notice.message)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_SECONDARY),
                        )
                        .wrap(),
                    );
                    ui.add_space(theme::SPACING_XL);
                    let ok = ui.add(theme::button_accent(format!("{}  OK", egui_phosphor::regular::CHECK)));
                    if ok.clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        acknowledged = true;
                    }
                });
            });

        if acknowledged || modal_response.should_close() {
            self.controller.dismiss_notice();
            self.focus_input = true;
        }
    }
}
