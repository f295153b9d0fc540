use eframe::egui;

use crate::{EframeApp, WINDOW_TITLE};

pub fn show_about_tab(app: &mut EframeApp, ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(
            egui::RichText::new(format!(
                "{WINDOW_TITLE} version {}",
                env!("CARGO_PKG_VERSION")
            ))
            .size(18.0),
        );
        ui.add_space(8.0);

        if ui.button("About").clicked() {
            app.popups.message(
                "About",
                format!(
                    "{WINDOW_TITLE}\nVersion {}\n\nPhotograph a page, find the book.",
                    env!("CARGO_PKG_VERSION")
                ),
            );
        }
    });
}
