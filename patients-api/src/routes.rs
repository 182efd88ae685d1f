//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use data_protection::Level;
use tokio::task;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{patient::Patient, state::AppState};

/// Builds the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/patients", post(create_patient))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates a patient. Nothing is stored; the patient is logged through the
/// redacting sink and echoed back unredacted.
async fn create_patient(
    State(state): State<AppState>,
    Json(patient): Json<Patient>,
) -> impl IntoResponse {
    let id = Uuid::new_v4();

    // The sink locks and writes synchronously; keep that off the async workers.
    let sink = Arc::clone(&state.sink);
    let logged = patient.clone();
    if let Err(err) =
        task::spawn_blocking(move || sink.emit(&logged, Level::Information, "Patient created"))
            .await
    {
        warn!(%id, error = %err, "patient log task failed");
    }
    debug!(%id, "patient created");

    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/patients/{id}"))],
        Json(patient),
    )
}
