// HTTP request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::assessment::{self, AssessmentError, AssessmentResult, ScaleType};
use crate::crisis::Severity;
use crate::errors::ChatError;
use crate::service::ConversationService;
use crate::session::Message;

/// Create the application router
pub fn create_router(service: Arc<ConversationService>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/chat/sessions", post(create_session))
        .route(
            "/api/chat/sessions/:id/messages",
            post(send_message),
        )
        .route("/api/chat/sessions/:id/history", get(get_history))
        .route("/api/chat/sessions/:id", axum::routing::delete(delete_session))
        .route(
            "/api/assessments/:scale",
            get(get_scale).post(submit_assessment),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_sessions: usize,
}

async fn health_check(
    State(service): State<Arc<ConversationService>>,
) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        active_sessions: service.session_count().await?,
    }))
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

async fn create_session(
    State(service): State<Arc<ConversationService>>,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    let session_id = service.create_session().await?;
    Ok(Json(CreateSessionResponse { session_id }))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub reply: String,
    pub severity: Severity,
    pub session_id: String,
}

async fn send_message(
    State(service): State<Arc<ConversationService>>,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let turn = service.send_message(&session_id, &request.message).await?;

    Ok(Json(SendMessageResponse {
        reply: turn.reply,
        severity: turn.severity,
        session_id,
    }))
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
}

async fn get_history(
    State(service): State<Arc<ConversationService>>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let messages = service.history(&session_id).await?;
    Ok(Json(HistoryResponse { messages }))
}

async fn delete_session(
    State(service): State<Arc<ConversationService>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_session(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct ScaleResponse {
    pub scale: ScaleType,
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [&'static str],
    pub options: &'static [&'static str],
}

async fn get_scale(Path(slug): Path<String>) -> Result<Json<ScaleResponse>, ApiError> {
    let scale_type = parse_scale(&slug)?;
    let def = assessment::scale(scale_type);

    Ok(Json(ScaleResponse {
        scale: scale_type,
        title: def.title,
        description: def.description,
        questions: def.questions,
        options: def.options,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub answers: Vec<u32>,
}

async fn submit_assessment(
    Path(slug): Path<String>,
    Json(request): Json<SubmitAssessmentRequest>,
) -> Result<Json<AssessmentResult>, ApiError> {
    let scale_type = parse_scale(&slug)?;
    let result = assessment::score(scale_type, &request.answers)?;
    Ok(Json(result))
}

fn parse_scale(slug: &str) -> Result<ScaleType, ApiError> {
    ScaleType::from_slug(slug).ok_or_else(|| ApiError::UnknownScale(slug.to_string()))
}

/// Error wrapper mapping the core taxonomy onto HTTP statuses
pub enum ApiError {
    Chat(ChatError),
    Assessment(AssessmentError),
    UnknownScale(String),
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self::Chat(err)
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        Self::Assessment(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            ApiError::Chat(err) => {
                let status = match err {
                    ChatError::EmptyInput => StatusCode::BAD_REQUEST,
                    ChatError::SessionNotFound(_) => StatusCode::NOT_FOUND,
                    ChatError::StaleWrite { .. } => StatusCode::CONFLICT,
                    ChatError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
                    ChatError::InvalidContextWindow => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, "chat_error", err.to_string())
            }
            ApiError::Assessment(err) => (StatusCode::BAD_REQUEST, "assessment_error", err.to_string()),
            ApiError::UnknownScale(slug) => (
                StatusCode::NOT_FOUND,
                "assessment_error",
                format!("unknown scale: {}", slug),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        } else {
            tracing::debug!(error = %message, "Request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "message": message,
                "type": kind
            }
        });

        (status, Json(body)).into_response()
    }
}
