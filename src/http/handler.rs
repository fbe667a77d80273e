//! HTTP handlers for the job graph API

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::graph::NodeId;
use crate::service::{GraphService, NewJob, ServiceError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    pub start_id: u64,
    pub target_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoicesRequest {
    pub current_node_id: u64,
    pub target_node_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub current_node_id: u64,
    pub target_node_id: u64,
    pub chosen_node_id: u64,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Map service failures: a missing graph is a server-side condition, not a
/// client error.
fn service_error(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, &error.to_string())
}

/// 404 for ids the graph does not know; the pathfinder itself cannot tell
/// an unknown id apart from a disconnected pair.
async fn require_job(service: &GraphService, id: NodeId) -> Result<(), Response> {
    match service.job(id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(error_response(
            StatusCode::NOT_FOUND,
            &format!("unknown job id {}", id.as_u64()),
        )),
        Err(e) => Err(service_error(e)),
    }
}

pub async fn all_jobs_handler(State(service): State<Arc<GraphService>>) -> Response {
    match service.all_jobs().await {
        Ok(jobs) => Json(jobs).into_response(),
        Err(e) => service_error(e),
    }
}

pub async fn job_handler(
    State(service): State<Arc<GraphService>>,
    Path(id): Path<u64>,
) -> Response {
    match service.job(NodeId::new(id)).await {
        Ok(Some(job)) => Json(job).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, &format!("unknown job id {}", id)),
        Err(e) => service_error(e),
    }
}

pub async fn insert_job_handler(
    State(service): State<Arc<GraphService>>,
    Json(job): Json<NewJob>,
) -> Response {
    match service.insert_job(job).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id.as_u64() }))).into_response(),
        Err(e) => service_error(e),
    }
}

pub async fn calculate_path_handler(
    State(service): State<Arc<GraphService>>,
    Json(request): Json<PathRequest>,
) -> Response {
    let start = NodeId::new(request.start_id);
    let target = NodeId::new(request.target_id);

    if let Err(response) = require_job(&service, start).await {
        return response;
    }
    if let Err(response) = require_job(&service, target).await {
        return response;
    }

    match service.calculate_path(start, target).await {
        Ok(Some(summary)) => Json(summary).into_response(),
        Ok(None) => error_response(StatusCode::BAD_REQUEST, "no path between the given jobs"),
        Err(e) => service_error(e),
    }
}

pub async fn choices_handler(
    State(service): State<Arc<GraphService>>,
    Json(request): Json<ChoicesRequest>,
) -> Response {
    let current = NodeId::new(request.current_node_id);
    let target = NodeId::new(request.target_node_id);

    if let Err(response) = require_job(&service, current).await {
        return response;
    }
    if let Err(response) = require_job(&service, target).await {
        return response;
    }

    match service.hop_choices(current, target).await {
        Ok(Some(round)) => Json(round).into_response(),
        Ok(None) => error_response(StatusCode::BAD_REQUEST, "no path between the given jobs"),
        Err(e) => service_error(e),
    }
}

pub async fn validate_handler(
    State(service): State<Arc<GraphService>>,
    Json(request): Json<ValidateRequest>,
) -> Response {
    let current = NodeId::new(request.current_node_id);
    let target = NodeId::new(request.target_node_id);
    let chosen = NodeId::new(request.chosen_node_id);

    for id in [current, target, chosen] {
        if let Err(response) = require_job(&service, id).await {
            return response;
        }
    }

    match service.validate_choice(current, target, chosen).await {
        Ok(Some(report)) => Json(report).into_response(),
        Ok(None) => error_response(StatusCode::BAD_REQUEST, "no path between the given jobs"),
        Err(e) => service_error(e),
    }
}

pub async fn graph_info_handler(State(service): State<Arc<GraphService>>) -> Response {
    match service.graph_info().await {
        Ok(info) => Json(info).into_response(),
        Err(e) => service_error(e),
    }
}

pub async fn status_handler(State(service): State<Arc<GraphService>>) -> Response {
    match service.graph_info().await {
        Ok(info) => Json(json!({
            "status": "healthy",
            "version": crate::VERSION,
            "graph": {
                "nodes": info.total_nodes,
                "edges": info.total_edges,
            }
        }))
        .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "error": e.to_string() })),
        )
            .into_response(),
    }
}
