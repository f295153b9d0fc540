use std::{path::PathBuf, sync::Arc, thread::JoinHandle};

use anyhow::{anyhow, Result};
use books::{google_books::GoogleBooks, BookLookup};
use image::RgbaImage;
use ocr::{tesseract::Tesseract, OcrService};

use crate::{
    config::AppConfig,
    identify::{self, OcrOptions, Outcome},
};

pub mod books;
pub mod ocr;

/// Holds instanciated services.
pub struct Services {
    pub ocr: Arc<dyn OcrService>,
    pub books: Arc<dyn BookLookup>,
    pub options: OcrOptions,
}

impl Services {
    /// Create a new `Services` from the given `AppConfig`.
    pub fn new(config: &AppConfig) -> Self {
        let ocr = Tesseract::new(config.tesseract_path.clone());
        match ocr.version() {
            Ok(version) => log::info!("Using {version}"),
            Err(e) => log::warn!("{e:#}"),
        }

        Self {
            ocr: Arc::new(ocr),
            books: Arc::new(GoogleBooks::default()),
            options: OcrOptions::from(config),
        }
    }

    /// Recognise the page at `path` and look the book up, on a worker thread.
    pub fn identify(&self, path: PathBuf) -> ServiceJob<Outcome> {
        let ocr = self.ocr.clone();
        let books = self.books.clone();
        let options = self.options.clone();

        ServiceJob::new(move || identify::identify(ocr.as_ref(), books.as_ref(), &path, &options))
    }

    /// Download a cover thumbnail, on a worker thread.
    pub fn cover(&self, url: String) -> ServiceJob<Result<RgbaImage>> {
        let books = self.books.clone();
        ServiceJob::new(move || books.cover(&url))
    }
}

/// A job being performed by a service. May or may not be finished.
pub struct ServiceJob<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> ServiceJob<T> {
    pub fn new<F: FnOnce() -> T + Send + 'static>(f: F) -> Self {
        std::thread::spawn(f).into()
    }
}

impl<T> ServiceJob<T> {
    /// Get the return value of this `ServiceJob` if it was finished.
    ///
    /// - Returns `Err` if the job has already finished and its return value was taken previously,
    ///   or if the job panicked;
    /// - Returns `Ok(None)` if the job has not finished yet;
    /// - Returns `Ok(Some(T))` if the job has finished.
    pub fn try_wait(&mut self) -> Result<Option<T>> {
        match self.handle.take() {
            None => Err(anyhow!("job already finished")),
            Some(handle) if handle.is_finished() => join(handle).map(Some),
            Some(handle) => {
                self.handle = Some(handle);
                Ok(None)
            }
        }
    }

    /// Wait for the job to finish and return its return value.
    pub fn wait(self) -> Result<T> {
        match self.handle {
            None => Err(anyhow!("job already finished")),
            Some(handle) => join(handle),
        }
    }
}

impl<T> From<JoinHandle<T>> for ServiceJob<T> {
    fn from(handle: JoinHandle<T>) -> Self {
        ServiceJob {
            handle: Some(handle),
        }
    }
}

fn join<T>(handle: JoinHandle<T>) -> Result<T> {
    handle.join().map_err(|_| anyhow!("service job panicked"))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn try_wait_yields_value_once() {
        let mut job = ServiceJob::new(|| 42);

        let value = loop {
            if let Some(value) = job.try_wait().unwrap() {
                break value;
            }
            std::thread::sleep(Duration::from_millis(1));
        };

        assert_eq!(value, 42);
        assert!(job.try_wait().is_err());
    }

    #[test]
    fn pending_job_is_not_consumed() {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let mut job = ServiceJob::new(move || rx.recv().is_ok());

        assert!(job.try_wait().unwrap().is_none());
        tx.send(()).unwrap();
        assert!(job.wait().unwrap());
    }

    #[test]
    fn panicking_job_is_an_error() {
        let job = ServiceJob::new(|| -> u8 { panic!("boom") });
        assert!(job.wait().is_err());
    }
}
