//! Image element for placed raster images.

use super::ElementId;
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raster formats recognised on ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Gif,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    /// Detect format from a MIME type such as `image/png`.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/webp" => Some(ImageFormat::WebP),
            "image/gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // GIF87a / GIF89a
        if data.starts_with(b"GIF8") {
            return Some(ImageFormat::Gif);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// A raster image placed on the canvas.
///
/// `src` is either an inline `data:` URI or an external URL. The frame
/// (`x`, `y`, `width`, `height`) is the displayed region; cropping only
/// changes the frame, never the pixel data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Inline data URI or external URL.
    pub src: String,
    /// MIME type of the image data, e.g. `image/png`.
    pub media_type: String,
}

impl ImageElement {
    /// Create an image referencing `src`.
    pub fn new(position: Point, width: f64, height: f64, src: String, media_type: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: position.x,
            y: position.y,
            width,
            height,
            src,
            media_type,
        }
    }

    /// Create an image with the given bytes embedded as a data URI.
    pub fn from_bytes(position: Point, width: f64, height: f64, data: &[u8], media_type: &str) -> Self {
        Self::new(position, width, height, data_uri(media_type, data), media_type.to_string())
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Whether the pixel data is embedded in `src`.
    pub fn is_inline(&self) -> bool {
        self.src.starts_with("data:")
    }

    /// Split an inline source into `(media_type, base64_payload)`.
    pub fn inline_payload(&self) -> Option<(&str, &str)> {
        parse_data_uri(&self.src)
    }

    /// Decode the embedded bytes of an inline image.
    pub fn data(&self) -> Option<Vec<u8>> {
        let (_, payload) = self.inline_payload()?;
        STANDARD.decode(payload).ok()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        let rect = rect.abs();
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }

    /// Scale to fit within `max_side` on both axes, preserving aspect ratio.
    /// Images already inside the limit are left alone.
    pub fn fit_within(mut self, max_side: f64) -> Self {
        if self.width <= max_side && self.height <= max_side {
            return self;
        }
        if self.height <= 0.0 || self.width <= 0.0 {
            return self;
        }
        let aspect = self.width / self.height;
        if aspect >= 1.0 {
            self.width = max_side;
            self.height = max_side / aspect;
        } else {
            self.height = max_side;
            self.width = max_side * aspect;
        }
        self
    }
}

/// Build a base64 `data:` URI.
pub fn data_uri(media_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(data))
}

/// Parse `data:<mime>;base64,<payload>`.
pub fn parse_data_uri(src: &str) -> Option<(&str, &str)> {
    let rest = src.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let media_type = header.strip_suffix(";base64")?;
    Some((media_type, payload))
}
