use eframe::egui;
use egui_extras::{Size, StripBuilder};

use crate::EframeApp;

pub fn show_history_tab(app: &mut EframeApp, ui: &mut egui::Ui) {
    StripBuilder::new(ui)
        .size(Size::remainder())
        .size(Size::exact(8.0))
        .size(Size::exact(28.0))
        .vertical(|mut strip| {
            strip.cell(|ui| {
                ui.label(egui::RichText::new("Search history").size(18.0).strong());
                ui.separator();

                if app.history.is_empty() {
                    ui.label("No books found yet.");
                }

                egui::ScrollArea::vertical()
                    .auto_shrink(false)
                    .show(ui, |ui| {
                        for record in app.history.iter() {
                            ui.label(egui::RichText::new(record.to_string()).size(14.0));
                        }
                    });
            });

            strip.empty();

            strip.cell(|ui| {
                ui.centered_and_justified(|ui| {
                    if ui
                        .add_enabled(!app.history.is_empty(), egui::Button::new("Clear history"))
                        .clicked()
                    {
                        log::info!("Clearing {} history entries", app.history.len());
                        app.history.clear();
                    }
                });
            });
        });
}
