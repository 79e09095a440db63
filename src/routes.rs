use crate::error::{AppError, Message};
use crate::model::{Project, Votes};
use crate::service::{Authorization, VotingService};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{Method, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

pub const VOTES_UPDATED: &str = "votes updated";
pub const PROJECT_NOT_FOUND: &str = "Project not found";

pub fn router(service: Arc<VotingService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/projects", get(projects_handler))
        .route("/vote", post(vote_handler))
        .route("/authorize", post(authorize_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

pub async fn projects_handler(State(service): State<Arc<VotingService>>) -> Json<Vec<Project>> {
    Json(service.projects().await)
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    status: &'static str,
    #[serde(flatten)]
    errors: BTreeMap<String, &'static str>,
}

pub async fn vote_handler(
    State(service): State<Arc<VotingService>>,
    payload: Result<Json<Votes>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(votes) = payload?;
    if votes.is_empty() {
        debug!("empty vote batch");
    }
    let outcome = service.apply_votes(&votes).await;
    info!(
        applied = outcome.applied,
        unknown = outcome.unknown.len(),
        "vote batch processed"
    );

    let status = if outcome.is_complete() {
        StatusCode::OK
    } else {
        StatusCode::PARTIAL_CONTENT
    };
    let errors = outcome
        .unknown
        .iter()
        .map(|id| (format!("error_project_{id}"), PROJECT_NOT_FOUND))
        .collect();

    Ok((
        status,
        Json(VoteResponse {
            status: VOTES_UPDATED,
            errors,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct AuthorizeRequest {
    rfid: Option<String>,
}

pub async fn authorize_handler(
    State(service): State<Arc<VotingService>>,
    payload: Result<Json<AuthorizeRequest>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let Json(request) = payload?;
    let rfid = request
        .rfid
        .filter(|rfid| !rfid.is_empty())
        .ok_or(AppError::MissingRfid)?;

    match service.authorize(&rfid) {
        Authorization::Granted => {
            info!(rfid = %rfid, "tag authorized");
            Ok(Json(Message::new("Authorized")))
        }
        Authorization::Denied => {
            debug!(rfid = %rfid, "tag refused");
            Err(AppError::Forbidden)
        }
    }
}
