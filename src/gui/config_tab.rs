use eframe::egui;

use crate::{config::Config, EframeApp};

pub fn show_config_tab(app: &mut EframeApp, ui: &mut egui::Ui) {
    egui_extras::StripBuilder::new(ui)
        .size(egui_extras::Size::remainder())
        .size(egui_extras::Size::exact(0.0))
        .size(egui_extras::Size::exact(22.0))
        .vertical(|mut strip| {
            strip.cell(|ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let header_size = 24.0;

                    ui.label(
                        egui::RichText::new(concat!(env!("CARGO_PKG_NAME"), " Configuration"))
                            .size(header_size)
                            .strong(),
                    );

                    ui.label(format!("Configuration file: {}", app.config_path.display()));
                    ui.label(
                        "Settings are read at startup. \
                         Edit the file or pass command line flags to change them.",
                    );

                    ui.separator();

                    app.config.show_ui(ui);
                });
            });

            strip.empty();

            strip.cell(|ui| {
                ui.centered_and_justified(|ui| {
                    if ui.button("Check OCR engine").clicked() {
                        match app.services.ocr.version() {
                            Ok(version) => app.popups.message("OCR engine", version),
                            Err(e) => app.popups.error(e),
                        }
                    }
                });
            });
        });
}
