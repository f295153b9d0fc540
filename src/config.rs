use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub trait Config: Serialize + DeserializeOwned + Default {
    /// Path of the configuration file, relative to the application's configuration directory.
    fn path() -> &'static str;
    fn show_ui(&self, ui: &mut egui::Ui);

    /// Where the configuration file lives when no explicit path is given.
    fn default_location() -> Result<PathBuf> {
        let mut config_path = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not find suitable config directory"))?;
        config_path.push(env!("CARGO_PKG_NAME"));
        config_path.push(Self::path());
        Ok(config_path)
    }

    /// Loads a configuration file, or creates a default configuration struct if the file does not
    /// exist.
    fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            log::info!(
                "No configuration file at `{}`, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let file = File::open(config_path).with_context(|| {
            format!(
                "Could not open configuration file: `{}`",
                config_path.display()
            )
        })?;

        let config = serde_json::from_reader(file).with_context(|| {
            format!(
                "Could not read configuration file: `{}`",
                config_path.display(),
            )
        })?;

        log::info!("Loaded configuration from `{}`", config_path.display());
        Ok(config)
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(config_dir) = config_path.parent() {
            std::fs::create_dir_all(config_dir).with_context(|| {
                format!(
                    "Could not create configuration directory: `{}`",
                    config_dir.display()
                )
            })?;
        }

        let file = File::create(config_path).with_context(|| {
            format!(
                "Could not write to configuration file: `{}`",
                config_path.display()
            )
        })?;

        serde_json::to_writer_pretty(file, self).with_context(|| {
            format!(
                "Could not serialise configuration file: `{}`",
                config_path.display()
            )
        })?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The tesseract executable. A bare name is looked up in `PATH`.
    pub tesseract_path: PathBuf,
    /// Tesseract language packs, joined with `+`.
    pub language: String,
    /// Whether pages are thresholded to black and white before OCR.
    pub binarize: bool,
}

impl AppConfig {
    /// Apply values given on the command line on top of the loaded configuration.
    pub fn with_overrides(
        mut self,
        tesseract_path: Option<PathBuf>,
        language: Option<String>,
    ) -> Self {
        if let Some(tesseract_path) = tesseract_path {
            self.tesseract_path = tesseract_path;
        }
        if let Some(language) = language {
            self.language = language;
        }
        self
    }
}

impl Config for AppConfig {
    fn path() -> &'static str {
        "config.json"
    }

    fn show_ui(&self, ui: &mut egui::Ui) {
        egui::Grid::new("app_config")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.label("Tesseract:");
                ui.monospace(self.tesseract_path.display().to_string());
                ui.end_row();

                ui.label("Languages:");
                ui.monospace(&self.language);
                ui.end_row();

                ui.label("Binarize pages:");
                ui.label(if self.binarize { "yes" } else { "no" });
                ui.end_row();
            });
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tesseract_path: PathBuf::from("tesseract"),
            language: "rus+eng".to_owned(),
            binarize: true,
        }
    }
}
