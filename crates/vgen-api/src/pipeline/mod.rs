//! Progress-streaming generation pipeline.
//!
//! A run turns a request body into a stored [`VideoRecord`]:
//!
//! 1. parse and validate the body
//! 2. write the script
//! 3. derive scene prompts and synthesize images
//! 4. assemble and store the record
//!
//! Progress events are emitted before each stage and exactly one terminal
//! event ends the run. Each synthesis step falls back to placeholder
//! content on its own, so only boundary failures reach the client.

pub mod fallback;
pub mod images;
pub mod scenes;
pub mod script;

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::Instrument;
use vgen_models::{GenerateRequest, GenerationEvent, RequestError, VideoRecord};
use vgen_openai::OpenAiClient;

use crate::logging::RunLogger;
use crate::metrics;
use crate::store::ResultStore;

pub use fallback::{fallback_images, fallback_script, FALLBACK_IMAGE_URLS};
pub use images::ImageSynthesizer;
pub use scenes::{scene_prompts, SCENE_COUNT};
pub use script::ScriptWriter;

pub const MSG_SCRIPT: &str = "Generating script with AI...";
pub const MSG_SCENES: &str = "Creating visual scenes...";
pub const MSG_FINALIZE: &str = "Finalizing video data...";

/// Message used when a failure carries no description.
pub const GENERIC_FAILURE: &str = "Generation failed";

/// Failures that end a run before anything is stored.
///
/// Synthesis steps recover with fallback content, so only request
/// problems reach this type.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl PipelineError {
    /// Text sent to the client in the terminal error event.
    pub fn client_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

/// Event sender for one run.
pub type EventSender = mpsc::Sender<GenerationEvent>;

/// Runs generation requests against the store.
#[derive(Clone)]
pub struct Pipeline {
    store: Arc<ResultStore>,
    script_writer: ScriptWriter,
    image_synthesizer: ImageSynthesizer,
}

impl Pipeline {
    pub fn new(store: Arc<ResultStore>, client: Option<Arc<OpenAiClient>>) -> Self {
        Self {
            store,
            script_writer: ScriptWriter::new(client.clone()),
            image_synthesizer: ImageSynthesizer::new(client),
        }
    }

    pub fn store(&self) -> &Arc<ResultStore> {
        &self.store
    }

    /// Whether the synthesis steps call the provider.
    pub fn is_live(&self) -> bool {
        self.script_writer.is_live() && self.image_synthesizer.is_live()
    }

    /// Run a request body to completion, emitting exactly one terminal event.
    ///
    /// Send failures are ignored: a client that went away does not stop
    /// the run or the store append.
    pub async fn run(&self, body: &[u8], tx: EventSender) {
        let logger = RunLogger::new();
        let span = logger.span();
        self.run_logged(body, tx, logger).instrument(span).await
    }

    async fn run_logged(&self, body: &[u8], tx: EventSender, logger: RunLogger) {
        let start = Instant::now();
        logger.log_received(body.len());

        let outcome = match GenerateRequest::from_json(body) {
            Ok(request) => {
                logger.record_request(&request);
                Ok(self.execute(&request, &tx, &logger).await)
            }
            Err(e) => Err(PipelineError::from(e)),
        };

        let terminal = match outcome {
            Ok(record) => {
                logger.log_stored(&record, start.elapsed().as_secs_f64());
                metrics::record_generation("success", start.elapsed().as_secs_f64());
                GenerationEvent::Done
            }
            Err(e) => {
                logger.log_failed(&e);
                metrics::record_generation("error", start.elapsed().as_secs_f64());
                GenerationEvent::error(e.client_message())
            }
        };

        emit(&tx, terminal).await;
    }

    /// Execute the stages for a validated request and store the result.
    pub async fn execute(
        &self,
        request: &GenerateRequest,
        tx: &EventSender,
        logger: &RunLogger,
    ) -> VideoRecord {
        logger.log_stage(MSG_SCRIPT);
        emit(tx, GenerationEvent::progress(MSG_SCRIPT)).await;
        let script = self.script_writer.write(request).await;

        logger.log_stage(MSG_SCENES);
        emit(tx, GenerationEvent::progress(MSG_SCENES)).await;
        let prompts = scene_prompts(&script, SCENE_COUNT);
        let images = self.image_synthesizer.synthesize(&prompts).await;
        if images.len() < prompts.len() {
            logger.log_warning(&format!(
                "{} of {} scene images generated",
                images.len(),
                prompts.len()
            ));
        }

        logger.log_stage(MSG_FINALIZE);
        emit(tx, GenerationEvent::progress(MSG_FINALIZE)).await;
        let record = VideoRecord::new(
            request.topic.clone(),
            request.niche.clone(),
            script,
            images,
        );
        self.store.append(record.clone()).await;

        record
    }
}

async fn emit(tx: &EventSender, event: GenerationEvent) {
    let event_type = event.event_type();
    if tx.send(event).await.is_ok() {
        metrics::record_stream_event(event_type.as_str());
    }
}
