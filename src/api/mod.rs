use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug};

use crate::error::AppError;
use crate::models::*;
use crate::services::SyncService;
use crate::state::AppState;
use crate::validation::{require_class_ids, validate_record_id};

pub fn router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(state.settings.log_headers),
        )
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .route("/health", get(health))
        .route("/sync", post(sync_now))
        .route("/classes", get(list_classes).post(create_class))
        .route("/class-instances", get(list_instances).post(create_instance))
        .route("/schedule", post(schedule))
        .with_state(state)
        .layer(trace_layer)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.ping().await?;
    Ok(StatusCode::OK)
}

async fn sync_now(
    State(state): State<AppState>,
    payload: Result<Json<SyncPayload>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let service = SyncService::new(state.store.clone());
    service.sync_all(payload).await?;
    Ok(Json(json!({ "message": "sync completed" })))
}

async fn list_classes(State(state): State<AppState>) -> Result<Json<Vec<YogaClass>>, AppError> {
    let classes = state.store.list_yoga_classes().await?;
    Ok(Json(classes))
}

async fn create_class(
    State(state): State<AppState>,
    req: Result<Json<YogaClass>, JsonRejection>,
) -> Result<(StatusCode, Json<YogaClass>), AppError> {
    let Json(class) = req?;
    validate_record_id("yoga class", &class.id)?;
    state.store.insert_yoga_class(&class).await?;
    debug!("created yoga class {}", class.id);
    Ok((StatusCode::CREATED, Json(class)))
}

async fn list_instances(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassInstance>>, AppError> {
    let instances = state.store.list_class_instances().await?;
    Ok(Json(instances))
}

async fn create_instance(
    State(state): State<AppState>,
    req: Result<Json<ClassInstance>, JsonRejection>,
) -> Result<(StatusCode, Json<ClassInstance>), AppError> {
    let Json(instance) = req?;
    validate_record_id("class instance", &instance.id)?;
    state.store.insert_class_instance(&instance).await?;
    debug!("created class instance {}", instance.id);
    Ok((StatusCode::CREATED, Json(instance)))
}

async fn schedule(
    State(state): State<AppState>,
    req: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Json<Vec<ClassInstance>>, AppError> {
    let Json(req) = req?;
    let class_ids = require_class_ids(req.class_ids)?;
    let instances = state.store.find_instances_by_class_ids(&class_ids).await?;
    Ok(Json(instances))
}
