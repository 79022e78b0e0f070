//! Scene image synthesis.

use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::{debug, warn};
use vgen_openai::{ImageQuality, ImageSize, OpenAiClient};

use super::fallback::fallback_images;
use crate::metrics;

/// Turns scene prompts into image URLs.
#[derive(Clone)]
pub struct ImageSynthesizer {
    client: Option<Arc<OpenAiClient>>,
}

impl ImageSynthesizer {
    pub fn new(client: Option<Arc<OpenAiClient>>) -> Self {
        Self { client }
    }

    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    /// One image per prompt, requested concurrently.
    ///
    /// Responses without a URL are skipped. If any request fails the
    /// partial results are discarded and the stock list is returned.
    pub async fn synthesize(&self, prompts: &[String]) -> Vec<String> {
        let Some(client) = &self.client else {
            debug!("No provider credential, using fallback images");
            metrics::record_fallback("images", "unconfigured");
            return fallback_images();
        };

        let requests = prompts.iter().map(|prompt| {
            client.generate_image(prompt.as_str(), ImageSize::Landscape, ImageQuality::Standard)
        });

        match try_join_all(requests).await {
            Ok(urls) => {
                metrics::record_provider_request("image", true);
                urls.into_iter().flatten().collect()
            }
            Err(e) => {
                metrics::record_provider_request("image", false);
                warn!(prompts = prompts.len(), error = %e, "Image generation failed, using fallback images");
                metrics::record_fallback("images", "error");
                fallback_images()
            }
        }
    }
}
