//! Panel rendering: labeling sidebar, accuracy plot, history strip, status bar

use super::App;
use crate::chart::{label_at, AccuracyChart, DATASET_NAME};
use std::sync::Arc;
use crate::constants::*;
use crate::theme;
use crate::ui::components::{digit_image, format_accuracy, history_card, section_title};
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

impl App {
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(28.0)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(12, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}  {}",
                            egui_phosphor::regular::PLUGS_CONNECTED,
                            self.backend_url
                        ))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("v{}", APP_VERSION))
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        );
                        let pending = self.controller.in_flight();
                        if pending > 0 {
                            ui.label(
                                egui::RichText::new(format!("{} pending", pending))
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_MUTED),
                            );
                            ui.spinner();
                        }
                    });
                });
            });
    }

    pub(crate) fn render_label_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("label_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(APP_NAME)
                            .size(theme::FONT_TITLE)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_XL);

                section_title(ui, egui_phosphor::regular::IMAGE, "Digit to label");
                ui.add_space(theme::SPACING_SM);
                ui.vertical_centered(|ui| {
                    let texture = self.image_texture.as_ref().map(|(_, t)| t);
                    digit_image(ui, texture, theme::DIGIT_VIEW_SIZE);
                });
                ui.add_space(theme::SPACING_XL);

                section_title(ui, egui_phosphor::regular::TAG, "Label");
                ui.add_space(theme::SPACING_SM);

                let input = ui.add(
                    egui::TextEdit::singleline(&mut self.controller.label_input)
                        .hint_text("0-9")
                        .font(egui::FontId::proportional(theme::FONT_HEADING))
                        .desired_width(f32::INFINITY)
                        .margin(egui::Margin::symmetric(8, 8)),
                );
                if self.focus_input && !self.notice_shown {
                    input.request_focus();
                    self.focus_input = false;
                }
                let enter = !self.notice_shown
                    && input.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(theme::SPACING_MD);
                let submit = ui.add_sized(
                    [ui.available_width(), theme::BUTTON_HEIGHT_LARGE],
                    theme::button_accent(format!("{}  Submit", egui_phosphor::regular::PAPER_PLANE_RIGHT)),
                );
                if submit.clicked() || enter {
                    self.controller.submit_label();
                    self.focus_input = true;
                }

                ui.add_space(theme::SPACING_SM);
                let reload = ui
                    .add_sized(
                        [ui.available_width(), theme::BUTTON_HEIGHT_LARGE],
                        theme::button(format!("{}  Reload", egui_phosphor::regular::ARROWS_CLOCKWISE)),
                    )
                    .on_hover_text("Fetch the image, history and accuracy again");
                if reload.clicked() {
                    self.controller.refresh_all();
                }
            });
    }

    pub(crate) fn render_session_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                section_title(ui, egui_phosphor::regular::CHART_LINE_UP, "Model accuracy");
                ui.add_space(theme::SPACING_SM);
                theme::section_frame().show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    match &self.controller.chart {
                        Some(chart) => render_accuracy_plot(ui, chart),
                        None => {
                            ui.set_min_height(theme::CHART_HEIGHT);
                            ui.centered_and_justified(|ui| {
                                ui.label(egui::RichText::new("No accuracy scores yet").color(theme::TEXT_DIM));
                            });
                        }
                    }
                });

                ui.add_space(theme::SPACING_XL);
                section_title(ui, egui_phosphor::regular::CLOCK_COUNTER_CLOCKWISE, "Recently labeled");
                ui.add_space(theme::SPACING_SM);
                if self.controller.history.is_empty() {
                    ui.label(egui::RichText::new("Nothing labeled yet").color(theme::TEXT_DIM));
                } else {
                    ui.horizontal_wrapped(|ui| {
                        for (i, item) in self.controller.history.iter().enumerate() {
                            let texture = self.history_textures.get(i).and_then(Option::as_ref);
                            history_card(ui, texture, item.label);
                        }
                    });
                }
            });
    }
}

/// Line plot keyed on the chart id so pan/zoom survive in-place updates.
fn render_accuracy_plot(ui: &mut egui::Ui, chart: &AccuracyChart) {
    let (y_min, y_max) = AccuracyChart::y_bounds();
    let axis_labels = chart.shared_labels();
    let hover_labels = Arc::clone(&axis_labels);

    Plot::new(("accuracy_chart", chart.id()))
        .height(theme::CHART_HEIGHT)
        .include_y(y_min)
        .include_y(y_max)
        .include_x(1.0)
        .set_margin_fraction(egui::vec2(0.05, 0.0))
        .allow_scroll(false)
        .y_axis_label(DATASET_NAME)
        .x_axis_formatter(move |mark, _range| {
            label_at(&axis_labels, mark.value).map(str::to_string).unwrap_or_default()
        })
        .label_formatter(move |_name, point| match label_at(&hover_labels, point.x.round()) {
            Some(label) => format!("{}\n{}", label, format_accuracy(point.y)),
            None => String::new(),
        })
        .legend(egui_plot::Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(chart.points()))
                    .name(DATASET_NAME)
                    .color(theme::CHART_LINE)
                    .width(theme::STROKE_THICK),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(chart.points()))
                    .color(theme::CHART_LINE)
                    .radius(3.0),
            );
        });
}
