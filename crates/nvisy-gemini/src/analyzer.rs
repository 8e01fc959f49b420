//! Image analyzer: request shaping on top of a [`Transport`].

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use url::Url;

use crate::image::encode_image;
use crate::request::{AnalysisRequest, GenerationConfig, InlineData};
use crate::{
    AnalysisResult, BatchOutcome, BatchResult, Error, GeminiConfig, ImageInput, Result,
    TRACING_TARGET_CLIENT, Transport,
};

/// Maximum number of body characters kept from failed responses.
const ERROR_BODY_LIMIT: usize = 1024;

/// Turns an image and a prompt into one `generateContent` call.
///
/// Each call is independent: one best-effort attempt, no retries and no
/// caching. The transport is shared behind an `Arc`, so cloning is cheap.
///
/// # Examples
///
/// ```rust,ignore
/// use nvisy_gemini::{GeminiConfig, ImageAnalyzer, ImageInput};
///
/// let analyzer = ImageAnalyzer::from_config(GeminiConfig::new(api_key))?;
/// let images = vec![ImageInput::from_path("a.jpg"), ImageInput::from_path("b.png")];
///
/// let batch = analyzer.analyze_batch(&images, "Describe this image").await;
/// println!("{} succeeded, {} failed", batch.succeeded(), batch.failed());
/// ```
#[derive(Clone)]
pub struct ImageAnalyzer {
    transport: Arc<dyn Transport>,
    config: GeminiConfig,
    endpoint: Url,
    generation_config: GenerationConfig,
}

impl std::fmt::Debug for ImageAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAnalyzer")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint.as_str())
            .field("generation_config", &self.generation_config)
            .finish_non_exhaustive()
    }
}

impl ImageAnalyzer {
    /// Creates an analyzer that sends requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is missing or the
    /// endpoint URL cannot be built.
    pub fn new<T>(config: GeminiConfig, transport: T) -> Result<Self>
    where
        T: Transport + 'static,
    {
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates an analyzer from an already shared transport.
    pub fn with_transport(config: GeminiConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint()?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %endpoint,
            "Creating image analyzer"
        );

        Ok(Self {
            transport,
            config,
            endpoint,
            generation_config: GenerationConfig::default(),
        })
    }

    /// Creates an analyzer backed by the reqwest transport.
    #[cfg(feature = "reqwest")]
    #[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        let transport = crate::reqwest::ReqwestTransport::new(&config)?;
        Self::new(config, transport)
    }

    /// Replaces the generation configuration sent with every request.
    #[must_use]
    pub fn with_generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = generation_config;
        self
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Returns the generation configuration.
    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation_config
    }

    /// Analyzes one image with the given prompt.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFormat` / `Encoding` if the image cannot be resolved,
    /// - `Transport` with the status code on a non-2xx response,
    /// - `NetworkError` if no response was received,
    /// - `Serialization` if the success body is not JSON.
    pub async fn analyze(&self, image: &ImageInput, prompt: &str) -> Result<AnalysisResult> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            filename = image.name(),
            mime_type = image.mime_type(),
            prompt_len = prompt.len(),
            "Analyzing image"
        );

        let result = self.send(image, prompt).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(_) => {
                tracing::debug!(
                    target: TRACING_TARGET_CLIENT,
                    filename = image.name(),
                    elapsed_ms = elapsed.as_millis(),
                    "Image analysis successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_CLIENT,
                    filename = image.name(),
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Image analysis failed"
                );
            }
        }

        result
    }

    /// Analyzes images one at a time, in input order.
    ///
    /// Each call is awaited before the next is issued. A failure is recorded
    /// for its image and the batch moves on, so the result always holds one
    /// outcome per input.
    pub async fn analyze_batch(&self, images: &[ImageInput], prompt: &str) -> BatchResult {
        let total = images.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, image) in images.iter().enumerate() {
            tracing::info!(
                target: TRACING_TARGET_CLIENT,
                index = index + 1,
                total,
                filename = image.name(),
                "Analyzing image {}/{}",
                index + 1,
                total
            );

            let outcome = match self.analyze(image, prompt).await {
                Ok(result) => BatchOutcome::success(image.name(), result),
                Err(error) => BatchOutcome::failure(image.name(), error.to_string()),
            };
            outcomes.push(outcome);
        }

        let batch = BatchResult::new(outcomes);

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            total,
            succeeded = batch.succeeded(),
            failed = batch.failed(),
            "Batch analysis completed"
        );

        batch
    }

    async fn send(&self, image: &ImageInput, prompt: &str) -> Result<AnalysisResult> {
        let data = encode_image(image).await?;

        let request = AnalysisRequest::new(prompt, InlineData::new(image.mime_type(), data))
            .with_generation_config(self.generation_config.clone());
        let body = serde_json::to_vec(&request)?;

        let response = self.transport.post_json(&self.request_url(), body).await?;

        if !response.is_success() {
            let body = response.body_snippet(ERROR_BODY_LIMIT);

            tracing::warn!(
                target: TRACING_TARGET_CLIENT,
                filename = image.name(),
                status_code = response.status,
                body = %body,
                "Remote service rejected request"
            );

            let mut error = Error::transport(response.status);
            if !body.trim().is_empty() {
                error = error.with_message(format!(
                    "HTTP error, status: {}: {}",
                    response.status,
                    body.trim()
                ));
            }
            return Err(error);
        }

        let value: Value = serde_json::from_slice(&response.body)?;
        Ok(AnalysisResult::new(value))
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        url
    }
}
