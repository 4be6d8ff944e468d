use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use super::status_for;
use crate::context::AppContext;
use crate::domain::ticket::NewTicketRequest;
use crate::error::AppError;
use crate::workflow::ticket::{create_ticket, list_tickets};

const NOT_AUTHENTICATED: &str = "Not authenticated. Visit / to authorize.";
const LIST_FAILED: &str = "Failed to retrieve Zendesk Tickets.";
const CREATE_FAILED: &str = "Failed to create ticket";

pub async fn list(State(ctx): State<AppContext>) -> Response {
    match list_tickets(&ctx).await {
        Ok(tickets) => Json(json!({ "success": true, "tickets": tickets })).into_response(),
        Err(AppError::NotAuthenticated) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": NOT_AUTHENTICATED })),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, upstream_status = ?err.upstream_status(), "failed to list tickets");
            (
                status_for(&err, StatusCode::INTERNAL_SERVER_ERROR),
                Json(json!({ "success": false, "message": LIST_FAILED })),
            )
                .into_response()
        }
    }
}

pub async fn create(
    State(ctx): State<AppContext>,
    payload: Result<Json<NewTicketRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "rejected ticket request");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Invalid ticket request: {}", rejection.body_text()) })),
            )
                .into_response();
        }
    };

    match create_ticket(&ctx, request).await {
        // The alert task keeps running after its handle is dropped.
        Ok(outcome) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "Ticket creation successful",
                "ticket": outcome.ticket.into_inner(),
            })),
        )
            .into_response(),
        Err(AppError::NotAuthenticated) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": NOT_AUTHENTICATED })),
        )
            .into_response(),
        Err(AppError::InvalidRequest(message)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Invalid ticket request: {message}") })),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, upstream_status = ?err.upstream_status(), "failed creating ticket");
            (
                status_for(&err, StatusCode::INTERNAL_SERVER_ERROR),
                Json(json!({ "error": CREATE_FAILED })),
            )
                .into_response()
        }
    }
}
