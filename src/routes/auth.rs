use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::{error, warn};

use super::status_for;
use crate::context::AppContext;
use crate::domain::auth::{failure_page, welcome_page};
use crate::error::AppError;
use crate::workflow::auth::{authorization_redirect, complete_authorization};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

pub async fn authorize(State(ctx): State<AppContext>) -> Response {
    let location = authorization_redirect(&ctx);
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

pub async fn callback(
    State(ctx): State<AppContext>,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(reason) = params.error {
        let detail = params.error_description.unwrap_or(reason);
        warn!(%detail, "authorization was declined");
        return (
            StatusCode::UNAUTHORIZED,
            Html(failure_page(&format!("Authorization was declined: {detail}"))),
        )
            .into_response();
    }

    let Some(code) = params.code.filter(|code| !code.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Html(failure_page("Missing authorization code.")),
        )
            .into_response();
    };

    match complete_authorization(&ctx, &code).await {
        Ok(identity) => Html(welcome_page(&identity)).into_response(),
        Err(err) => {
            error!(error = %err, "authorization callback failed");
            (
                status_for(&err, StatusCode::BAD_GATEWAY),
                Html(failure_page(callback_failure_message(&err))),
            )
                .into_response()
        }
    }
}

/// Page text for a failed callback. Upstream detail stays in the log.
fn callback_failure_message(err: &AppError) -> &'static str {
    match err {
        AppError::UpstreamAuth {
            status: Some(400 | 401 | 403),
            ..
        } => "Zendesk rejected the authorization. Please start again from the home page.",
        AppError::UpstreamAuth { .. } => "Zendesk could not complete the authorization.",
        AppError::Timeout(_) => "Zendesk did not respond in time.",
        AppError::InvalidRequest(_) => "Missing authorization code.",
        _ => "The authorization could not be completed.",
    }
}
