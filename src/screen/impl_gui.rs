use crate::app::App;
use crate::screen::state::ScreenState;
use eframe::egui;
use std::error::Error;
use std::sync::Arc;

const PREVIEW_SIZE: f32 = 320.0;

struct ScreenWindow {
    state: ScreenState,
    preview: Option<egui::TextureHandle>,
    preview_version: u64,
}

impl ScreenWindow {
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if self.preview_version == self.state.image_version {
            return;
        }
        self.preview_version = self.state.image_version;

        self.preview = self.state.image.as_ref().map(|image| {
            let rgba = image.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            ctx.load_texture("selected-image", color_image, egui::TextureOptions::LINEAR)
        });
    }
}

fn fit(size: egui::Vec2, max_side: f32) -> egui::Vec2 {
    let longest = size.x.max(size.y);
    if longest <= 0.0 {
        return size;
    }
    size * (max_side / longest)
}

impl eframe::App for ScreenWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_preview(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Flower Identifier");
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.label("Image");
                    ui.text_edit_singleline(&mut self.state.path_input);
                    if ui.button("Select").clicked() {
                        self.state.select();
                    }
                });

                ui.add_space(12.0);

                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE),
                    egui::Sense::hover(),
                );
                ui.painter()
                    .rect_filled(rect, 4.0, egui::Color32::from_rgb(40, 40, 40));
                if let Some(texture) = &self.preview {
                    let size = fit(texture.size_vec2(), PREVIEW_SIZE);
                    let image_rect = egui::Rect::from_center_size(rect.center(), size);
                    ui.painter().image(
                        texture.id(),
                        image_rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }

                ui.add_space(12.0);

                let predict = ui.add_enabled(
                    self.state.can_predict(),
                    egui::Button::new("Predict").min_size(egui::vec2(120.0, 32.0)),
                );
                if predict.clicked() {
                    self.state.predict();
                }

                ui.add_space(12.0);
                ui.label(egui::RichText::new(&self.state.label).size(24.0).strong());

                if let Some(message) = &self.state.message {
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(message).italics());
                }
            });
        });
    }
}

/// Opens the window and blocks until it is closed.
pub fn run(app: Arc<App>) -> Result<(), Box<dyn Error + Send + Sync>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 600.0])
            .with_resizable(false),
        ..Default::default()
    };

    let window = ScreenWindow {
        state: ScreenState::new(app),
        preview: None,
        preview_version: 0,
    };

    eframe::run_native(
        "Flower Identifier",
        options,
        Box::new(|_cc| Box::new(window)),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
