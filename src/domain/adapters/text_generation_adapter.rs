//! Text generation over HTTP.
//!
//! The sampling seed is drawn from the caller's random source, so a seeded RNG reproduces a
//! remote sampling run while the default thread RNG keeps descriptions varied.

use super::http::{GeneratedTextResponse, HttpClient, HttpEndpoint};
use crate::core::config::SamplingParams;
use crate::core::errors::{CopyResult, ProcessingStage};
use crate::core::traits::TextGenerator;
use rand::RngCore;
use serde::Serialize;

const ADAPTER_NAME: &str = "HttpTextGenerator";

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters<'a>,
}

#[derive(Serialize)]
struct GenerationParameters<'a> {
    #[serde(flatten)]
    sampling: &'a SamplingParams,
    seed: u64,
}

/// [`TextGenerator`] backed by a remote text-to-text service.
pub struct HttpTextGenerator {
    client: HttpClient,
}

impl HttpTextGenerator {
    /// Creates a text generator for the given endpoint.
    pub fn new(endpoint: HttpEndpoint) -> CopyResult<Self> {
        Ok(Self {
            client: HttpClient::new(endpoint, ProcessingStage::Generation, ADAPTER_NAME)?,
        })
    }
}

impl TextGenerator for HttpTextGenerator {
    fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
        rng: &mut dyn RngCore,
    ) -> CopyResult<String> {
        let request = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                sampling: params,
                seed: rng.next_u64(),
            },
        };
        let response: GeneratedTextResponse = self.client.post_json(&request)?;
        response
            .into_text()
            .ok_or_else(|| self.client.error("service returned no text"))
    }

    fn name(&self) -> &str {
        ADAPTER_NAME
    }
}
