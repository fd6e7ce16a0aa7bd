//! Translation routes - one-shot JSON and streamed HTML fragments.

use askama::Template;
use axum::{
    Json,
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use polyglot_core::{BatchRequest, TranslationOutcome};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, error};

use super::{StreamQuery, TranslateBody};
use crate::helpers::{ResultExt, RouteResult, split_codes};
use crate::state::AppState;
use crate::templates::TranslationBoxTemplate;

fn build_request(
    state: &AppState,
    text: &str,
    from: Option<String>,
    targets: Vec<String>,
) -> RouteResult<BatchRequest> {
    let from = from
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| state.config.source_lang.to_string());

    // Validation failures carry the message shown to the user
    BatchRequest::new(text, from, targets).or_bad_request()
}

/// Translate into every requested target and answer once all are done.
///
/// Per-target failures are outcomes with `is_error`, never an HTTP error.
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TranslateBody>,
) -> RouteResult<Json<Vec<TranslationOutcome>>> {
    let request = build_request(&state, &body.text, body.from, body.targets)?;
    let outcomes = state.batch.translate_to_many(&request).await;
    Ok(Json(outcomes))
}

/// SSE stream of translation boxes, one `outcome` event per target in order,
/// then a single `done` event.
///
/// A client that disconnects drops the stream, which stops the batch before
/// its next target.
#[allow(tail_expr_drop_order)] // Drop order change in async_stream macro is harmless here
pub async fn translate_stream(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StreamQuery>,
) -> RouteResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let request = build_request(&state, &query.text, query.from, split_codes(&query.to))?;

    let stream = async_stream::stream! {
        let mut outcomes = std::pin::pin!(state.batch.stream(&request));
        let mut delivered = 0usize;

        while let Some(outcome) = outcomes.next().await {
            match TranslationBoxTemplate::from(&outcome).render() {
                Ok(html) => {
                    delivered += 1;
                    yield Ok(Event::default().event("outcome").data(html));
                }
                Err(e) => error!("Failed to render outcome for {}: {}", outcome.to_lang, e),
            }
        }

        debug!("Streamed {} of {} outcomes", delivered, request.targets().len());
        yield Ok(Event::default().event("done").data(delivered.to_string()));
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
