//! `generateContent`-style image model client and HTTP image fetcher.
//!
//! Request: one user turn whose parts are the input images (`inlineData`)
//! followed by the prompt (`text`). Response: candidate parts carrying an
//! image (`inlineData`) and/or text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{GeneratorConfig, GeneratorTimeouts};
use crate::types::{BoxFuture, EncodedImage, GenerateError, GenerationRequest, GenerationResponse, ImageFetcher, ImageGenerator};

const API_KEY_HEADER: &str = "x-goog-api-key";

fn build_http(timeouts: GeneratorTimeouts) -> Result<reqwest::Client, GenerateError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| GenerateError::HttpClientBuild(e.to_string()))
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        Ok(Self {
            http: build_http(config.timeouts)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn send_json(&self, body: &impl Serialize) -> Result<String, GenerateError> {
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerateError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GenerateError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(GenerateError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

impl ImageGenerator for GeminiClient {
    fn generate<'a>(&'a self, request: &'a GenerationRequest) -> BoxFuture<'a, Result<GenerationResponse, GenerateError>> {
        Box::pin(async move {
            log::debug!(
                "POST {} ({} image(s), prompt {} chars)",
                self.endpoint(),
                request.images.len(),
                request.prompt.len()
            );
            let body = build_request_body(request);
            let text = self.send_json(&body).await?;
            parse_generate_response(&text)
        })
    }
}

/// Fetches external image URLs over HTTP.
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeouts: GeneratorTimeouts) -> Result<Self, GenerateError> {
        Ok(Self {
            http: build_http(timeouts)?,
        })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, GenerateError>> {
        Box::pin(async move {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| GenerateError::Fetch(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(GenerateError::Fetch(format!("{url}: HTTP {}", status.as_u16())));
            }
            let bytes = response
                .bytes()
                .await
                .map_err(|e| GenerateError::Fetch(e.to_string()))?;
            Ok(bytes.to_vec())
        })
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Serialize)]
struct WireRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Serialize)]
struct WireContent<'a> {
    role: &'static str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Image {
        #[serde(rename = "inlineData")]
        inline_data: WireBlob<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
struct WireBlob<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
struct WireGenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: [&'static str; 2],
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<WirePromptFeedback>,
}

#[derive(Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireCandidateContent>,
}

#[derive(Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Deserialize)]
struct WireResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    inline_data: Option<WireResponseBlob>,
}

#[derive(Deserialize)]
struct WireResponseBlob {
    #[serde(rename = "mimeType", alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct WirePromptFeedback {
    #[serde(default, rename = "blockReason")]
    block_reason: Option<String>,
}

fn build_request_body(request: &GenerationRequest) -> WireRequest<'_> {
    let mut parts: Vec<WirePart<'_>> = request
        .images
        .iter()
        .map(|image| WirePart::Image {
            inline_data: WireBlob {
                mime_type: &image.media_type,
                data: image.to_base64(),
            },
        })
        .collect();
    parts.push(WirePart::Text { text: &request.prompt });

    WireRequest {
        contents: vec![WireContent { role: "user", parts }],
        generation_config: WireGenerationConfig {
            response_modalities: ["TEXT", "IMAGE"],
        },
    }
}

fn parse_generate_response(text: &str) -> Result<GenerationResponse, GenerateError> {
    let wire: WireResponse = serde_json::from_str(text).map_err(|e| GenerateError::ApiParse(e.to_string()))?;

    let mut image = None;
    let mut texts = Vec::new();
    for part in wire
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
    {
        if let Some(blob) = part.inline_data.filter(|_| image.is_none()) {
            let data = STANDARD
                .decode(blob.data.trim())
                .map_err(|e| GenerateError::ApiParse(format!("image payload: {e}")))?;
            image = Some(EncodedImage::new(data, blob.mime_type));
        }
        if let Some(t) = part.text {
            let t = t.trim();
            if !t.is_empty() {
                texts.push(t.to_string());
            }
        }
    }

    if texts.is_empty() {
        if let Some(reason) = wire.prompt_feedback.and_then(|f| f.block_reason) {
            texts.push(format!("Request blocked: {reason}"));
        }
    }

    Ok(GenerationResponse {
        image,
        text: if texts.is_empty() { None } else { Some(texts.join("\n")) },
    })
}
