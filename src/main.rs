use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use book::BookRecord;
use clap::Parser;
use config::{AppConfig, Config};
use eframe::{egui, CreationContext};
use gui::{book_tab::BookView, popups::Popups, Tab};
use history::SearchHistory;
use identify::Outcome;
use services::{ServiceJob, Services};

pub mod book;
pub mod config;
pub mod gui;
pub mod history;
pub mod identify;
pub mod preprocess;
pub mod services;

pub const WINDOW_TITLE: &str = "BookieDookie";

pub const NOT_ENOUGH_TEXT: &str =
    "Not enough text to search, or the image format is not supported.";
pub const BOOK_NOT_FOUND: &str = "Book not found.";

/// Identify a book from a photo of one of its pages.
#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version)]
struct Cli {
    /// Path to the tesseract executable, overriding the configuration file
    #[arg(long, alias = "tesseract_path")]
    tesseract_path: Option<PathBuf>,

    /// Configuration file to use instead of the one in the user's configuration directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tesseract language packs, eg. `rus+eng`
    #[arg(long)]
    lang: Option<String>,

    /// Write the effective configuration to the configuration file and exit
    #[arg(long)]
    write_config: bool,

    /// Identify this image and print the result instead of opening a window
    image: Option<PathBuf>,
}

fn main() -> Result<()> {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_location()?,
    };
    let config = AppConfig::load_from(&config_path)
        .context("Could not load main configuration file")?
        .with_overrides(cli.tesseract_path, cli.lang);

    if cli.write_config {
        config.save_to(&config_path)?;
        println!("Wrote configuration to `{}`", config_path.display());
        return Ok(());
    }

    if let Some(image) = cli.image {
        return identify_headless(&config, image);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(EframeApp::new(cc, config, config_path)))),
    )
    .map_err(|e| anyhow!("{e}"))
}

fn identify_headless(config: &AppConfig, image: PathBuf) -> Result<()> {
    let services = Services::new(config);

    match services.identify(image).wait()? {
        Outcome::NotEnoughText => bail!(NOT_ENOUGH_TEXT),
        Outcome::NotFound => bail!(BOOK_NOT_FOUND),
        Outcome::Found(BookRecord {
            title,
            authors,
            cover_image,
        }) => {
            println!("Title: {title}");
            println!("Authors: {authors}");
            if let Some(cover_image) = cover_image {
                println!("Cover: {cover_image}");
            }
            Ok(())
        }
    }
}

pub struct EframeApp {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub services: Services,
    pub history: SearchHistory,
    pub popups: Popups,

    pub tab: Tab,
    /// Contents of the image path field on the search tab.
    pub image_path: String,
    pub search_job: Option<ServiceJob<Outcome>>,
    pub book: Option<BookView>,
}

impl EframeApp {
    pub fn new(_cc: &CreationContext, config: AppConfig, config_path: PathBuf) -> Self {
        let services = Services::new(&config);

        Self {
            config,
            config_path,
            services,
            history: SearchHistory::default(),
            popups: Popups::default(),

            tab: Tab::Search,
            image_path: String::new(),
            search_job: None,
            book: None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search_job.is_some()
    }

    /// Start identifying the page at `path`, unless a search is already running.
    pub fn start_search(&mut self, path: PathBuf) {
        if self.is_searching() {
            log::warn!("A search is already running, ignoring `{}`", path.display());
            return;
        }

        self.image_path = path.display().to_string();
        self.search_job = Some(self.services.identify(path));
    }

    fn poll_search(&mut self, ctx: &egui::Context) {
        let Some(job) = &mut self.search_job else {
            return;
        };

        match job.try_wait() {
            Ok(None) => {}
            Ok(Some(outcome)) => {
                self.search_job = None;
                self.show_outcome(ctx, outcome);
            }
            Err(e) => {
                self.search_job = None;
                self.popups.error(e.context("Search failed"));
            }
        }
    }

    fn show_outcome(&mut self, ctx: &egui::Context, outcome: Outcome) {
        self.history.record(&outcome);

        match outcome {
            Outcome::NotEnoughText => self.popups.message("Error", NOT_ENOUGH_TEXT),
            Outcome::NotFound => {
                self.book = Some(BookView::NotFound);
                self.tab = Tab::Book;
            }
            Outcome::Found(record) => {
                self.book = Some(BookView::found(record, &self.services));
                self.tab = Tab::Book;
                ctx.request_repaint();
            }
        }
    }
}

impl eframe::App for EframeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_search(ctx);
        if let Some(book) = &mut self.book {
            book.poll_cover(ctx);
        }

        let dropped = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.tab = Tab::Search;
            self.start_search(path);
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            gui::tab_bar(ui, &mut self.tab);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Search => gui::search_tab::show_search_tab(self, ui),
            Tab::Book => gui::book_tab::show_book_tab(self, ui),
            Tab::History => gui::history_tab::show_history_tab(self, ui),
            Tab::About => gui::about_tab::show_about_tab(self, ui),
            Tab::Settings => gui::config_tab::show_config_tab(self, ui),
        });

        self.popups.show(ctx);

        let cover_loading = self.book.as_ref().is_some_and(BookView::is_loading);
        if self.is_searching() || cover_loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
