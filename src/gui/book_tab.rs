use anyhow::Result;
use eframe::egui::{self, load::SizedTexture};
use image::RgbaImage;

use crate::{
    book::BookRecord,
    services::{ServiceJob, Services},
    EframeApp, BOOK_NOT_FOUND,
};

use super::Tab;

/// What the "Your book" tab shows after a search.
pub enum BookView {
    NotFound,
    Found { record: BookRecord, cover: Cover },
}

pub enum Cover {
    Missing,
    Loading(ServiceJob<Result<RgbaImage>>),
    Ready(egui::TextureHandle),
}

impl BookView {
    /// Show a found book, starting to download its cover if it has one.
    pub fn found(record: BookRecord, services: &Services) -> Self {
        let cover = match &record.cover_image {
            Some(url) => Cover::Loading(services.cover(url.clone())),
            None => Cover::Missing,
        };
        Self::Found { record, cover }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::Found {
                cover: Cover::Loading(_),
                ..
            }
        )
    }

    /// Turn a finished cover download into a texture.
    pub fn poll_cover(&mut self, ctx: &egui::Context) {
        let Self::Found { cover, .. } = self else {
            return;
        };
        let Cover::Loading(job) = cover else {
            return;
        };

        let image = match job.try_wait() {
            Ok(None) => return,
            Ok(Some(Ok(image))) => image,
            Ok(Some(Err(e))) | Err(e) => {
                // a missing cover is not worth bothering the user about
                log::warn!("{e:#}");
                *cover = Cover::Missing;
                return;
            }
        };

        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [image.width() as usize, image.height() as usize],
            image.as_flat_samples().as_slice(),
        );
        *cover = Cover::Ready(ctx.load_texture(
            "book cover",
            color_image,
            egui::TextureOptions::LINEAR,
        ));
    }
}

pub fn show_book_tab(app: &mut EframeApp, ui: &mut egui::Ui) {
    let mut back = false;

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);

        match &app.book {
            None => {
                ui.label(egui::RichText::new("Search for a page first.").size(18.0));
            }
            Some(BookView::NotFound) => {
                ui.label(egui::RichText::new(BOOK_NOT_FOUND).size(18.0));
            }
            Some(BookView::Found { record, cover }) => {
                ui.label(
                    egui::RichText::new(format!("Title: {}", record.title))
                        .size(18.0)
                        .strong(),
                );
                ui.label(egui::RichText::new(format!("Authors: {}", record.authors)).size(14.0));
                ui.add_space(8.0);

                match cover {
                    Cover::Missing => {}
                    Cover::Loading(_) => {
                        ui.add(egui::Spinner::new().size(32.0));
                    }
                    Cover::Ready(texture) => {
                        ui.add(egui::Image::from_texture(SizedTexture::from_handle(texture)));
                    }
                }
            }
        }

        ui.add_space(16.0);
        back = ui.button(egui::RichText::new("Back").size(16.0)).clicked();
    });

    if back {
        app.tab = Tab::Search;
    }
}
