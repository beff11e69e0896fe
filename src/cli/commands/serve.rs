//! HTTP API server for the retrieval flows.
//!
//! Provides REST endpoints for lecture and document queries.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::engine::{DocumentEngine, LectureEngine};
use crate::storage::BlobStore;
use crate::summary::Summarizer;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    lecture: LectureEngine,
    document: DocumentEngine,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    // A missing API key only surfaces on the first query, warn up front.
    if let Err(e) = preflight::check(Operation::Serve) {
        Output::warning(&format!("{}", e));
    }

    let store = BlobStore::from_settings(&settings.storage).await?;
    let storage_backend = store.backend().to_string();
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::from_settings(
        &settings.embedding,
        &settings.generation,
    ));

    let lecture = LectureEngine::new(
        store.clone(),
        embedder.clone(),
        Summarizer::new(settings.generation.clone(), prompts.clone()),
        settings.clone(),
    );
    let document = DocumentEngine::new(
        store,
        embedder,
        Summarizer::new(settings.generation.clone(), prompts),
        settings.clone(),
    );

    let state = Arc::new(AppState { lecture, document });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/lecture", post(lecture_query))
        .route("/document", post(document_query))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Lese API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Storage", &storage_backend);
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Lecture query", "POST /lecture");
    Output::kv("Document query", "POST /document");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct QueryRequest {
    /// The query string to answer
    input: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn lecture_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    match state.lecture.answer(&req.input).await {
        Ok(answer) => Json(answer).into_response(),
        Err(e) => {
            tracing::error!("Lecture query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn document_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    match state.document.answer(&req.input).await {
        Ok(answer) => Json(answer).into_response(),
        Err(e) => {
            tracing::error!("Document query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
