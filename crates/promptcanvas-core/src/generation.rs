//! Editor side of prompt-driven image generation.
//!
//! The network call lives outside the core. The editor hands out a ticket
//! describing the request and later accepts the outcome for that ticket.
//! Outcomes for any other ticket are dropped.

use crate::canvas::Canvas;
use crate::elements::{Element, ElementId, ImageElement};
use crate::notice::NoticeLevel;
use kurbo::Point;

/// Side length of a generated image element.
pub const GENERATED_IMAGE_SIZE: f64 = 512.0;

/// Where generated images are placed.
pub const GENERATED_IMAGE_ANCHOR: Point = Point::new(50.0, 50.0);

/// Message shown when a request fails without a usable explanation.
pub const GENERATION_FAILED_MESSAGE: &str = "Image generation failed. Please try again.";

/// In-flight bookkeeping.
#[derive(Debug, Clone, Default)]
pub(crate) struct GenerationState {
    last_token: u64,
    in_flight: Option<u64>,
}

/// A generation request taken from the editor state at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationTicket {
    pub token: u64,
    pub prompt: String,
    /// Selected image elements, in selection order. Empty means "start from
    /// a blank canvas".
    pub inputs: Vec<ImageElement>,
}

/// What came back from the generator.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// Encoded image bytes.
    Image { data: Vec<u8>, media_type: String },
    /// No image, only the service's explanation.
    Text(String),
    /// The request failed.
    Failed(String),
}

impl Canvas {
    pub fn is_generating(&self) -> bool {
        self.generation.in_flight.is_some()
    }

    /// Start a request for `prompt` over the selected images.
    ///
    /// Returns `None` while another request is in flight or when the prompt
    /// is blank.
    pub fn begin_generation(&mut self, prompt: &str) -> Option<GenerationTicket> {
        if self.is_generating() {
            log::debug!("generation already in flight");
            return None;
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            self.notify_error("Enter a prompt first.");
            return None;
        }

        let inputs: Vec<ImageElement> = self
            .selection
            .ids()
            .iter()
            .filter_map(|&id| self.document.get(id).and_then(Element::as_image))
            .cloned()
            .collect();

        self.generation.last_token += 1;
        let token = self.generation.last_token;
        self.generation.in_flight = Some(token);
        log::info!("generation #{} started with {} input image(s)", token, inputs.len());

        Some(GenerationTicket {
            token,
            prompt: prompt.to_string(),
            inputs,
        })
    }

    /// Apply the outcome of request `token`.
    ///
    /// An image outcome becomes a new 512x512 element at the fixed anchor
    /// and is committed. Text and failures become error notices. Returns the
    /// new element's id.
    pub fn finish_generation(&mut self, token: u64, outcome: GenerationOutcome) -> Option<ElementId> {
        if self.generation.in_flight != Some(token) {
            log::warn!("dropping stale generation result #{}", token);
            return None;
        }
        self.generation.in_flight = None;

        let lifetime = self.config.generation_notice_lifetime();
        match outcome {
            GenerationOutcome::Image { data, media_type } => {
                let image = ImageElement::from_bytes(
                    GENERATED_IMAGE_ANCHOR,
                    GENERATED_IMAGE_SIZE,
                    GENERATED_IMAGE_SIZE,
                    &data,
                    &media_type,
                );
                log::info!("generation #{} produced {} ({} bytes)", token, media_type, data.len());
                self.add_elements(vec![Element::Image(image)]).pop()
            }
            GenerationOutcome::Text(text) => {
                self.notices.push(NoticeLevel::Error, text, lifetime);
                None
            }
            GenerationOutcome::Failed(reason) => {
                log::error!("generation #{} failed: {}", token, reason);
                self.notices.push(NoticeLevel::Error, GENERATION_FAILED_MESSAGE, lifetime);
                None
            }
        }
    }

    /// Forget the in-flight request. Its result will be ignored.
    pub fn cancel_generation(&mut self) -> bool {
        let cancelled = self.generation.in_flight.take();
        if let Some(token) = cancelled {
            log::info!("generation #{} cancelled", token);
        }
        cancelled.is_some()
    }
}
