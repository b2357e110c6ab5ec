//! App module - contains the main application state and logic

mod accuracy;
pub mod controller;
mod current_image;
mod history;
mod modals;
mod submission;
mod views;

use crate::api::HttpBackend;
use crate::settings::Settings;
use crate::theme;
use controller::Controller;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) controller: Controller<HttpBackend>,
    // Owns the worker threads behind the controller's handle
    _runtime: tokio::runtime::Runtime,
    pub(crate) backend_url: String,
    pub(crate) bootstrapped: bool,
    pub(crate) focus_input: bool,
    // Set while a notice was on screen this frame; the input ignores Enter then
    pub(crate) notice_shown: bool,
    // Uploaded textures, tagged with the generation they were built from
    pub(crate) image_texture: Option<(u64, egui::TextureHandle)>,
    pub(crate) history_textures: Vec<Option<egui::TextureHandle>>,
    pub(crate) history_textures_generation: u64,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for buttons and notices
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new()?;
        let backend_url = settings.effective_backend_url();
        let backend = HttpBackend::new(&backend_url);
        info!(url = %backend.base_url(), "Using labeling backend");

        let mut controller = Controller::new(Arc::new(backend), runtime.handle().clone());
        controller.set_repaint(cc.egui_ctx.clone());

        Ok(Self {
            controller,
            _runtime: runtime,
            backend_url,
            bootstrapped: false,
            focus_input: true,
            notice_shown: false,
            image_texture: None,
            history_textures: Vec::new(),
            history_textures_generation: 0,
            settings,
            data_dir,
            window_pos: None,
            window_size: None,
            needs_center: false,
        })
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    /// Upload any image the controller replaced since the last frame.
    pub(crate) fn sync_textures(&mut self, ctx: &egui::Context) {
        if let Some(loaded) = &self.controller.current_image {
            let stale = self
                .image_texture
                .as_ref()
                .map_or(true, |(generation, _)| *generation != loaded.generation);
            if stale {
                let texture = ctx.load_texture(
                    "current_digit",
                    to_color_image(&loaded.image),
                    egui::TextureOptions::NEAREST,
                );
                self.image_texture = Some((loaded.generation, texture));
            }
        }

        if self.history_textures_generation != self.controller.history_generation {
            self.history_textures = self
                .controller
                .history
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.image.as_ref().map(|img| {
                        ctx.load_texture(
                            format!("history_{}", i),
                            to_color_image(img),
                            egui::TextureOptions::NEAREST,
                        )
                    })
                })
                .collect();
            self.history_textures_generation = self.controller.history_generation;
        }
    }
}

fn to_color_image(image: &crate::types::DecodedImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(image.size, &image.rgba)
}
