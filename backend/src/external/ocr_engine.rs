//! OCR Engine Client
//!
//! Client for the hosted image-recognition service that converts a
//! photographed sheet into raw text. All heuristic interpretation of that
//! text happens in `shared::ocr`; this client only moves bytes.

use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::OcrConfig;
use crate::error::{AppError, AppResult};

/// Client for the OCR recognition service
#[derive(Clone)]
pub struct OcrEngineClient {
    api_endpoint: String,
    api_key: String,
    http_client: Client,
}

/// Request to recognize text in an image
#[derive(Debug, Serialize)]
pub struct RecognizeRequest {
    pub image_base64: String,
}

/// Response from the recognition API
#[derive(Debug, Deserialize)]
pub struct RecognizeResponse {
    /// Recognized text, line-per-line as seen on the sheet
    pub text: String,
    #[serde(default)]
    pub processing_time_ms: Option<i64>,
}

impl OcrEngineClient {
    /// Create a new OCR engine client
    pub fn new(api_endpoint: String, api_key: String) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_endpoint,
            api_key,
            http_client,
        }
    }

    /// Create a client from configuration; `None` when no endpoint is set
    pub fn from_config(config: &OcrConfig) -> Option<Self> {
        if config.api_endpoint.is_empty() {
            return None;
        }
        Some(Self::new(
            config.api_endpoint.clone(),
            config.api_key.clone(),
        ))
    }

    /// Create a client from environment variables
    pub fn from_env() -> Option<Self> {
        let api_endpoint = std::env::var("KSS__OCR__API_ENDPOINT").ok()?;
        let api_key = std::env::var("KSS__OCR__API_KEY").ok()?;

        Some(Self::new(api_endpoint, api_key))
    }

    /// Send an image for text recognition
    pub async fn recognize(&self, image: &[u8]) -> AppResult<String> {
        let request = RecognizeRequest {
            image_base64: base64::engine::general_purpose::STANDARD.encode(image),
        };

        let response = self
            .http_client
            .post(&self.api_endpoint)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::OcrEngine(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::OcrEngine(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| AppError::OcrEngine(format!("Failed to parse response: {}", e)))?;

        Ok(result.text)
    }
}
