//! Drive one generation request from editor ticket to editor outcome.

use promptcanvas_core::{Canvas, ElementId, GenerationOutcome, GenerationTicket};

use crate::encode::prepare_request;
use crate::types::{ImageFetcher, ImageGenerator};

/// Run a ticket against a generator. Never fails: every error is folded
/// into [`GenerationOutcome::Failed`].
pub async fn run_ticket(
    ticket: &GenerationTicket,
    generator: &dyn ImageGenerator,
    fetcher: &dyn ImageFetcher,
) -> GenerationOutcome {
    let request = match prepare_request(ticket, fetcher).await {
        Ok(request) => request,
        Err(err) => return GenerationOutcome::Failed(err.to_string()),
    };

    match generator.generate(&request).await {
        Ok(response) => match (response.image, response.text) {
            (Some(image), _) => GenerationOutcome::Image {
                data: image.data,
                media_type: image.media_type,
            },
            (None, Some(text)) => GenerationOutcome::Text(text),
            (None, None) => GenerationOutcome::Failed("empty response".to_string()),
        },
        Err(err) => {
            log::warn!("generation #{} request failed: {}", ticket.token, err);
            GenerationOutcome::Failed(err.to_string())
        }
    }
}

/// Submit `prompt` over the canvas selection and apply the result.
///
/// Holds the canvas for the whole request, so the token check in
/// [`Canvas::finish_generation`] only matters for callers that split the
/// steps themselves.
pub async fn generate_into(
    canvas: &mut Canvas,
    prompt: &str,
    generator: &dyn ImageGenerator,
    fetcher: &dyn ImageFetcher,
) -> Option<ElementId> {
    let ticket = canvas.begin_generation(prompt)?;
    let outcome = run_ticket(&ticket, generator, fetcher).await;
    canvas.finish_generation(ticket.token, outcome)
}
