//! Turning image elements into portable encoded inputs.

use crate::types::{EncodedImage, GenerateError, GenerationRequest, ImageFetcher};
use promptcanvas_core::{GenerationTicket, ImageElement};

/// Side length of the blank input used when nothing is selected or an
/// input cannot be loaded.
pub const BLANK_IMAGE_SIZE: u32 = 512;

const PNG_MEDIA_TYPE: &str = "image/png";

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, GenerateError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| GenerateError::Encode(format!("PNG header: {e}")))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| GenerateError::Encode(format!("PNG data: {e}")))?;
        writer
            .finish()
            .map_err(|e| GenerateError::Encode(format!("PNG finish: {e}")))?;
    }
    Ok(png_data)
}

/// A white square PNG.
pub fn blank_white_png(size: u32) -> Result<Vec<u8>, GenerateError> {
    let rgba = vec![255u8; (size as usize) * (size as usize) * 4];
    encode_png(&rgba, size, size)
}

/// The blank 512x512 white input.
pub fn blank_input() -> Result<EncodedImage, GenerateError> {
    Ok(EncodedImage::new(blank_white_png(BLANK_IMAGE_SIZE)?, PNG_MEDIA_TYPE))
}

/// Decode any supported raster format and re-encode it as PNG.
pub fn reencode_png(bytes: &[u8]) -> Result<EncodedImage, GenerateError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| GenerateError::Encode(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let data = encode_png(rgba.as_raw(), rgba.width(), rgba.height())?;
    Ok(EncodedImage::new(data, PNG_MEDIA_TYPE))
}

/// Encode one image element.
///
/// Inline images pass through unchanged. URL images are fetched and
/// re-encoded as PNG. Any failure for this one input yields the blank
/// white image instead.
pub async fn encode_input(image: &ImageElement, fetcher: &dyn ImageFetcher) -> Result<EncodedImage, GenerateError> {
    let encoded = if image.is_inline() {
        inline_bytes(image)
    } else {
        match fetcher.fetch(&image.src).await {
            Ok(bytes) => reencode_png(&bytes),
            Err(e) => Err(e),
        }
    };

    match encoded {
        Ok(encoded) => Ok(encoded),
        Err(e) => {
            log::warn!("input image {} unavailable, using blank: {}", image.id(), e);
            blank_input()
        }
    }
}

fn inline_bytes(image: &ImageElement) -> Result<EncodedImage, GenerateError> {
    let (media_type, _) = image
        .inline_payload()
        .ok_or_else(|| GenerateError::Encode("malformed data URI".to_string()))?;
    let media_type = if media_type.is_empty() { image.media_type.clone() } else { media_type.to_string() };
    let data = image
        .data()
        .ok_or_else(|| GenerateError::Encode("invalid base64 payload".to_string()))?;
    Ok(EncodedImage::new(data, media_type))
}

/// Build the service request for a ticket. No inputs means one blank image.
pub async fn prepare_request(
    ticket: &GenerationTicket,
    fetcher: &dyn ImageFetcher,
) -> Result<GenerationRequest, GenerateError> {
    let mut images = Vec::with_capacity(ticket.inputs.len().max(1));
    if ticket.inputs.is_empty() {
        images.push(blank_input()?);
    } else {
        for input in &ticket.inputs {
            images.push(encode_input(input, fetcher).await?);
        }
    }
    Ok(GenerationRequest {
        prompt: ticket.prompt.clone(),
        images,
    })
}
