use std::path::PathBuf;

use eframe::egui;

use crate::EframeApp;

pub fn show_search_tab(app: &mut EframeApp, ui: &mut egui::Ui) {
    let searching = app.is_searching();

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(egui::RichText::new("Load your page").size(24.0).strong());
        ui.label(
            "Enter the path of a photo or scan of a book page, \
             or drop the file onto this window.",
        );
        ui.add_space(16.0);

        let path_field = ui.add_enabled(
            !searching,
            egui::TextEdit::singleline(&mut app.image_path)
                .hint_text("/path/to/page.jpg")
                .desired_width(480.0),
        );
        let submitted =
            path_field.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));

        ui.add_space(8.0);

        let can_load = !searching && !app.image_path.trim().is_empty();
        let clicked = ui
            .add_enabled(can_load, egui::Button::new(egui::RichText::new("Load").size(16.0)))
            .clicked();

        if can_load && (clicked || submitted) {
            let path = PathBuf::from(app.image_path.trim());
            app.start_search(path);
        }

        if app.is_searching() {
            ui.add_space(16.0);
            ui.add(egui::Spinner::new().size(32.0));
            ui.label("Recognising text and searching...");
        }
    });
}
