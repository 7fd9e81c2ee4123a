//! Turning dropped, pasted or linked images into image elements.

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::elements::{Element, ElementId, ImageElement, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

/// Image ingestion errors.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("invalid image URL: {0:?}")]
    InvalidUrl(String),
}

/// A file handed over by drag-and-drop or the clipboard.
#[derive(Debug, Clone)]
pub struct IngestFile {
    /// File name, used as a type hint when the bytes are not recognised.
    pub name: Option<String>,
    pub bytes: Vec<u8>,
}

impl IngestFile {
    pub fn new(name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }
}

/// Detect the image format from magic bytes, falling back to the file
/// name's extension.
pub fn detect_format(bytes: &[u8], file_name: Option<&str>) -> Option<ImageFormat> {
    ImageFormat::from_magic_bytes(bytes).or_else(|| {
        let (_, ext) = file_name?.rsplit_once('.')?;
        ImageFormat::from_extension(ext)
    })
}

/// Natural pixel size of encoded image data.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), IngestError> {
    let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

/// Build an image element for encoded bytes, placed at the configured
/// ingest position and scaled down to the configured maximum side.
pub fn ingest_image_bytes(
    bytes: &[u8],
    file_name: Option<&str>,
    config: &EditorConfig,
) -> Result<ImageElement, IngestError> {
    let format = detect_format(bytes, file_name)
        .ok_or_else(|| IngestError::UnsupportedType(file_name.unwrap_or("unnamed").to_string()))?;
    let (width, height) = image_dimensions(bytes)?;
    log::debug!(
        "ingesting {} image {}x{} ({} bytes)",
        format.mime_type(),
        width,
        height,
        bytes.len()
    );
    let element = ImageElement::from_bytes(
        config.ingest_position,
        f64::from(width),
        f64::from(height),
        bytes,
        format.mime_type(),
    );
    Ok(element.fit_within(config.max_ingest_side))
}

/// Build an image element that references an external URL.
pub fn image_from_url(url: &str, width: f64, height: f64, config: &EditorConfig) -> Result<ImageElement, IngestError> {
    let url = url.trim();
    let is_http = url.starts_with("http://") || url.starts_with("https://");
    if !is_http || url.len() <= "https://".len() {
        return Err(IngestError::InvalidUrl(url.to_string()));
    }
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let format = path
        .rsplit_once('.')
        .and_then(|(_, ext)| ImageFormat::from_extension(ext))
        .unwrap_or(ImageFormat::Png);
    let element = ImageElement::new(
        config.ingest_position,
        width.max(1.0),
        height.max(1.0),
        url.to_string(),
        format.mime_type().to_string(),
    );
    Ok(element.fit_within(config.max_ingest_side))
}

impl Canvas {
    /// Ingest files in order and add the ones that decode in one commit.
    /// Failures become error notices.
    pub fn ingest_files(&mut self, files: &[IngestFile]) -> Vec<ElementId> {
        let mut elements = Vec::with_capacity(files.len());
        for file in files {
            match ingest_image_bytes(&file.bytes, file.name.as_deref(), &self.config) {
                Ok(image) => elements.push(Element::Image(image)),
                Err(err) => {
                    log::warn!("skipping dropped file: {}", err);
                    self.notify_error(format!("Could not add image: {err}"));
                }
            }
        }
        let ids = self.add_elements(elements);
        if !ids.is_empty() {
            log::info!("ingested {} image(s)", ids.len());
        }
        ids
    }

    /// Place an externally referenced image. An invalid URL raises a notice.
    pub fn add_image_url(&mut self, url: &str, width: f64, height: f64) -> Option<ElementId> {
        match image_from_url(url, width, height, &self.config) {
            Ok(image) => self.add_elements(vec![Element::Image(image)]).pop(),
            Err(err) => {
                self.notify_error(err.to_string());
                None
            }
        }
    }
}
