use crate::classification_session::main::ClassificationSession;
use crate::classification_session::render::{
    render, CAPTION, LOADING_LABEL, RESET_LABEL, SELECT_ANY_LABEL, SELECT_LABEL, SUBMIT_LABEL,
};
use crate::config::Config;
use crate::image_classifier::interface::{ImageClassifier, SelectedImage};
use crate::library::logger::interface::Logger;
use eframe::egui;
use std::sync::Arc;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];
const PREVIEW_MAX_SIZE: u32 = 640;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickerKind {
    Images,
    // rfd expands every extension to `*.{ext}`, so a catch-all filter would
    // still hide names without a dot. Any-file picking opens unfiltered.
    AnyFile,
}

fn picker_filters(kind: PickerKind) -> &'static [(&'static str, &'static [&'static str])] {
    match kind {
        PickerKind::Images => &[("Images", IMAGE_EXTENSIONS)],
        PickerKind::AnyFile => &[],
    }
}

fn file_dialog(kind: PickerKind) -> rfd::FileDialog {
    picker_filters(kind)
        .iter()
        .fold(rfd::FileDialog::new(), |dialog, &(name, extensions)| {
            dialog.add_filter(name, extensions)
        })
}

struct Preview {
    bytes: Arc<[u8]>,
    texture: Option<egui::TextureHandle>,
}

enum UiAction {
    Select(PickerKind),
    Submit,
    Reset,
}

struct ClassifierWindow {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    session: ClassificationSession,
    preview: Option<Preview>,
    notice: Option<String>,
}

impl ClassifierWindow {
    fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let session = ClassificationSession::new(logger.clone(), image_classifier);
        Self {
            config,
            logger: logger.with_namespace("gui"),
            session,
            preview: None,
            notice: None,
        }
    }

    fn pick_image(&mut self, kind: PickerKind) {
        self.notice = None;

        let picked = file_dialog(kind).pick_file();

        let image = match picked {
            Some(path) => match SelectedImage::from_path(&path) {
                Ok(image) => Some(image),
                Err(e) => {
                    let _ = self
                        .logger
                        .error(&format!("Failed to read {}: {}", path.display(), e));
                    self.notice = Some(format!("Could not read {}", path.display()));
                    None
                }
            },
            None => None,
        };

        let _ = self.session.select_image(image);
    }

    fn sync_preview(&mut self, ctx: &egui::Context) {
        let current = self.session.state().selected_image.as_ref();
        let stale = match (&self.preview, current) {
            (Some(preview), Some(image)) => !Arc::ptr_eq(&preview.bytes, &image.bytes),
            (None, None) => false,
            _ => true,
        };
        if !stale {
            return;
        }

        self.preview = current.map(|image| Preview {
            bytes: image.bytes.clone(),
            texture: load_preview_texture(ctx, image),
        });
    }

    fn apply(&mut self, action: UiAction) {
        let outcome = match action {
            UiAction::Select(kind) => {
                self.pick_image(kind);
                Ok(())
            }
            UiAction::Submit => self.session.submit(),
            UiAction::Reset => self.session.reset(),
        };

        if let Err(e) = outcome {
            self.notice = Some(e.to_string());
        }
    }
}

impl eframe::App for ClassifierWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.poll();
        self.sync_preview(ctx);

        let view = render(self.session.state());
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(&self.config.window_title);
                ui.label(egui::RichText::new(CAPTION).italics());
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    if ui.button(SELECT_LABEL).clicked() {
                        action = Some(UiAction::Select(PickerKind::Images));
                    }
                    if ui.small_button(SELECT_ANY_LABEL).clicked() {
                        action = Some(UiAction::Select(PickerKind::AnyFile));
                    }
                });

                if let Some(file_name) = &view.preview {
                    match self.preview.as_ref().and_then(|p| p.texture.as_ref()) {
                        Some(texture) => {
                            ui.add(egui::Image::new(texture).max_height(320.0));
                        }
                        None => {
                            ui.label("Preview unavailable");
                        }
                    }
                    ui.label(egui::RichText::new(file_name).monospace().small());
                }

                ui.add_space(8.0);
                if ui
                    .add_enabled(view.submit_enabled, egui::Button::new(SUBMIT_LABEL))
                    .clicked()
                {
                    action = Some(UiAction::Submit);
                }

                if view.loading {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(LOADING_LABEL).monospace().strong());
                        ui.spinner();
                    });
                }

                if let Some(verdict) = &view.verdict {
                    ui.label(egui::RichText::new(verdict).strong().size(24.0));
                }

                if let Some(error) = &view.error {
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
                }

                if view.reset_visible && ui.button(RESET_LABEL).clicked() {
                    action = Some(UiAction::Reset);
                }

                if let Some(notice) = &self.notice {
                    ui.label(egui::RichText::new(notice).weak());
                }
            });
        });

        if let Some(action) = action {
            self.apply(action);
            ctx.request_repaint();
        }

        if view.loading {
            ctx.request_repaint_after(self.config.poll_interval);
        }
    }
}

fn load_preview_texture(ctx: &egui::Context, image: &SelectedImage) -> Option<egui::TextureHandle> {
    let decoded = image::load_from_memory(&image.bytes).ok()?;
    let thumb = decoded.thumbnail(PREVIEW_MAX_SIZE, PREVIEW_MAX_SIZE);
    let size = [thumb.width() as usize, thumb.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &thumb.to_rgba8().into_raw());

    Some(ctx.load_texture(
        &image.file_name,
        color_image,
        egui::TextureOptions::default(),
    ))
}

/// Opens the window and blocks until it is closed. The session lives exactly
/// as long as the window.
pub fn run(
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size),
        ..Default::default()
    };
    let title = config.window_title.clone();

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Box::new(ClassifierWindow::new(config, logger, image_classifier))),
    )
}
