//! Structured logging for generation runs.
//!
//! Every run gets a [`RunLogger`] whose span carries the run id. Once the
//! body has been parsed the span also records the topic and niche, so all
//! later lines of a run can be filtered by either.

use tracing::field::Empty;
use tracing::{error, info, warn, Span};
use uuid::Uuid;
use vgen_models::{GenerateRequest, VideoRecord};

use crate::pipeline::PipelineError;

/// Niche field value for labels outside the known set.
pub const UNKNOWN_NICHE: &str = "unknown";

#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    span: Span,
}

impl RunLogger {
    /// Logger for a fresh run. Request fields stay empty until
    /// [`RunLogger::record_request`] is called.
    pub fn new() -> Self {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "generation",
            run_id = %run_id,
            topic = Empty,
            niche = Empty,
        );
        Self { run_id, span }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Span to instrument the run with.
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn log_received(&self, body_len: usize) {
        info!(run_id = %self.run_id, body_len, "Generation requested");
    }

    /// Attach the parsed request to the span and log it.
    pub fn record_request(&self, request: &GenerateRequest) {
        let niche = niche_field(request);
        self.span.record("topic", request.topic.as_str());
        self.span.record("niche", niche);

        info!(
            run_id = %self.run_id,
            niche,
            niche_label = %request.niche,
            duration_secs = request.duration,
            topic_len = request.topic.chars().count(),
            "Request accepted"
        );
    }

    pub fn log_stage(&self, message: &str) {
        info!(run_id = %self.run_id, "Stage: {}", message);
    }

    pub fn log_warning(&self, message: &str) {
        warn!(run_id = %self.run_id, "{}", message);
    }

    pub fn log_stored(&self, record: &VideoRecord, elapsed_secs: f64) {
        info!(
            run_id = %self.run_id,
            video_id = %record.id,
            images = record.images.len(),
            elapsed_secs,
            "Video stored"
        );
    }

    pub fn log_failed(&self, err: &PipelineError) {
        error!(run_id = %self.run_id, error = %err, "Generation failed");
    }
}

impl Default for RunLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Logged niche: the canonical value when known, [`UNKNOWN_NICHE`] otherwise.
pub fn niche_field(request: &GenerateRequest) -> &'static str {
    request
        .known_niche()
        .map(|n| n.as_str())
        .unwrap_or(UNKNOWN_NICHE)
}
