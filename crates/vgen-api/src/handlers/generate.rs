//! Video generation with server-sent progress events.

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, Stream};
use tokio::sync::mpsc;
use vgen_models::GenerationEvent;

use crate::state::AppState;

/// Buffered events per run. A run emits at most four.
const EVENT_BUFFER: usize = 8;

/// Start a generation run and stream its events.
///
/// The run executes in its own task, so it completes and stores its
/// result even if the client disconnects mid-stream. The stream ends after
/// the terminal event.
pub async fn generate_video(
    State(state): State<AppState>,
    body: Bytes,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel::<GenerationEvent>(EVENT_BUFFER);

    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.run(&body, tx).await;
    });

    // Stop after the terminal event instead of waiting for the sender to drop
    let events = stream::unfold((rx, false), |(mut rx, finished)| async move {
        if finished {
            return None;
        }
        let event = rx.recv().await?;
        let finished = event.is_terminal();
        Some((
            Ok::<_, Infallible>(Event::default().data(event.data())),
            (rx, finished),
        ))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
