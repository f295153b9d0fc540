use std::{
    io::{Cursor, ErrorKind, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use anyhow::{bail, Context, Result};
use image::{GrayImage, ImageFormat};

use super::OcrService;

/// Runs the `tesseract` command line program, piping the image through stdin.
pub struct Tesseract {
    path: PathBuf,
}

impl Tesseract {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OcrService for Tesseract {
    fn version(&self) -> Result<String> {
        let output = Command::new(&self.path)
            .arg("--version")
            .output()
            .with_context(|| {
                format!(
                    "Tesseract: Could not run `{}`, is tesseract installed?",
                    self.path.display()
                )
            })?;

        // older releases print the version to stderr
        let text = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };

        Ok(String::from_utf8_lossy(&text)
            .lines()
            .next()
            .unwrap_or("tesseract")
            .trim()
            .to_owned())
    }

    fn image_to_string(&self, image: &GrayImage, language: &str) -> Result<String> {
        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .context("Tesseract: Failed to encode image as PNG")?;

        let mut child = Command::new(&self.path)
            .args(["stdin", "stdout", "-l", language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Tesseract: Failed to start `{}`", self.path.display()))?;

        // the process may exit before reading all of stdin, its status and stderr explain why
        let piped = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(png.get_ref()),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .context("Tesseract: Failed to wait for process")?;

        if !output.status.success() {
            bail!(
                "Tesseract: Exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        match piped {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                return Err(e).context("Tesseract: Failed to pipe image to stdin");
            }
            _ => {}
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use image::Luma;

    use super::*;

    #[test]
    fn missing_binary_is_an_error() {
        let tesseract = Tesseract::new(PathBuf::from("/nonexistent/bin/tesseract"));
        let image = GrayImage::from_pixel(4, 4, Luma([255]));

        assert!(tesseract.version().is_err());
        let err = tesseract.image_to_string(&image, "eng").unwrap_err();
        assert!(err.to_string().contains("Failed to start"));
    }

    #[cfg(unix)]
    fn fake_engine(dir: &std::path::Path, script: &str) -> Tesseract {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("tesseract");
        std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        Tesseract::new(path)
    }

    /// Noise does not compress, so the PNG is far larger than a pipe buffer.
    #[cfg(unix)]
    fn noisy_page() -> GrayImage {
        GrayImage::from_fn(1500, 1500, |x, y| {
            let mut h = x.wrapping_mul(0x9e37_79b1) ^ y.wrapping_mul(0x85eb_ca77);
            h ^= h >> 15;
            h = h.wrapping_mul(0x2c1b_3c6d);
            Luma([(h >> 24) as u8])
        })
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let tesseract = fake_engine(
            dir.path(),
            "echo \"Failed loading language 'xyz'\" >&2\nexit 1",
        );

        let err = tesseract.image_to_string(&noisy_page(), "xyz").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Exited with"), "{message}");
        assert!(message.contains("Failed loading language 'xyz'"), "{message}");
    }

    #[cfg(unix)]
    #[test]
    fn output_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let tesseract = fake_engine(dir.path(), "cat > /dev/null\necho '  Recognised text  '");

        let text = tesseract.image_to_string(&noisy_page(), "eng").unwrap();
        assert_eq!(text, "Recognised text");
    }
}
