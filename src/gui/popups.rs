use eframe::egui::{self, vec2};

/// A stack of popups which should be shown to the user (eg. for error messages).
#[derive(Debug, Default)]
pub struct Popups {
    popups: Vec<Popup>,
    next_id: u64,
}

#[derive(Debug)]
struct Popup {
    /// Viewport id, stays the same while other popups come and go.
    id: u64,
    title: String,
    message: String,
    first_frame: bool,
}

impl Popups {
    /// Show a new error message to the user.
    pub fn error(&mut self, e: anyhow::Error) {
        log::error!("{e:#}");

        let mut s = format!("Error: {e}\n");

        for (idx, error) in e.chain().enumerate().skip(1) {
            s.push_str(&format!("\t{}. {}\n", idx, error));
        }

        self.message("Error", s);
    }

    /// Show a plain message to the user.
    pub fn message(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.popups.push(Popup {
            id: self.next_id,
            title: title.into(),
            message: message.into(),
            first_frame: true,
        });
        self.next_id += 1;
    }

    /// Show all currently held popups.
    pub fn show(&mut self, ctx: &egui::Context) {
        let mut close_popup = None;

        for (idx, popup) in self.popups.iter_mut().enumerate() {
            ctx.show_viewport_immediate(
                egui::ViewportId(egui::Id::new(("popup", popup.id))),
                egui::ViewportBuilder {
                    title: Some(popup.title.clone()),
                    inner_size: Some(vec2(400.0, 160.0)),
                    ..Default::default()
                },
                |ctx, _| {
                    if popup.first_frame {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
                        popup.first_frame = false
                    }

                    egui::CentralPanel::default().show(ctx, |ui| {
                        egui_extras::StripBuilder::new(ui)
                            .size(egui_extras::Size::remainder())
                            .size(egui_extras::Size::exact(22.0))
                            .vertical(|mut strip| {
                                strip.cell(|ui| {
                                    egui::ScrollArea::vertical().auto_shrink(false).show(
                                        ui,
                                        |ui| {
                                            ui.label(&popup.message);
                                        },
                                    );
                                });

                                strip.cell(|ui| {
                                    ui.centered_and_justified(|ui| {
                                        if ui.button("OK").clicked() {
                                            close_popup = Some(idx);
                                        }
                                    });
                                });
                            });
                    });

                    if ctx.input(|input| input.viewport().close_requested()) {
                        close_popup = Some(idx);
                    }
                },
            );
        }

        if let Some(idx) = close_popup {
            self.close(idx);
        }
    }

    fn close(&mut self, idx: usize) {
        self.popups.remove(idx);
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    #[test]
    fn error_lists_causes() {
        let e = Err::<(), _>(anyhow!("connection refused"))
            .context("Request failed")
            .unwrap_err();

        let mut popups = Popups::default();
        popups.error(e);

        assert_eq!(popups.popups.len(), 1);
        assert_eq!(popups.popups[0].title, "Error");
        assert_eq!(
            popups.popups[0].message,
            "Error: Request failed\n\t1. connection refused\n"
        );
    }

    #[test]
    fn ids_survive_closing_other_popups() {
        let mut popups = Popups::default();
        popups.message("Error", "same text");
        popups.message("Error", "same text");
        popups.message("About", "other text");

        let ids: Vec<u64> = popups.popups.iter().map(|p| p.id).collect();
        assert_eq!(ids, [0, 1, 2]);

        popups.close(0);
        popups.message("Error", "same text");

        let ids: Vec<u64> = popups.popups.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }
}
