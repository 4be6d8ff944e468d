use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::auth::UserIdentity;
use crate::domain::ticket::{CreatedTicket, TicketDraft, TicketSummary};
use crate::error::{AppError, AppResult};
use crate::services::HelpdeskService;

const MAX_ERROR_BODY: usize = 300;

pub struct ZendeskClient {
    http: Client,
    config: Arc<AppConfig>,
}

impl ZendeskClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| {
                AppError::Configuration(format!("failed to build Zendesk HTTP client: {err}"))
            })?;
        Ok(Self { http, config })
    }

    fn identity_endpoint(&self) -> String {
        format!("{}/api/v2/users/me.json", self.config.api_base_url)
    }

    fn tickets_endpoint(&self) -> String {
        format!("{}/api/v2/tickets.json", self.config.api_base_url)
    }

    fn bearer(token: &SecretString) -> String {
        format!("Bearer {}", token.expose_secret())
    }
}

/// Which error family a failed call belongs to.
#[derive(Clone, Copy)]
enum Call {
    Authorization,
    Tickets,
}

impl Call {
    fn failure(self, status: Option<StatusCode>, message: String) -> AppError {
        let status = status.map(|status| status.as_u16());
        match self {
            Call::Authorization => AppError::UpstreamAuth { status, message },
            Call::Tickets => AppError::Upstream { status, message },
        }
    }

    fn transport(self, what: &str, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            return AppError::Timeout(format!("Zendesk {what} call timed out"));
        }
        self.failure(
            err.status(),
            format!("failed to call Zendesk for {what}: {}", err.without_url()),
        )
    }

    async fn ensure_success(self, what: &str, response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string());
        Err(self.failure(
            Some(status),
            format!("Zendesk responded to {what} with {status}: {}", truncate(&body)),
        ))
    }

    async fn decode<T: DeserializeOwned>(self, what: &str, response: Response) -> AppResult<T> {
        let response = self.ensure_success(what, response).await?;
        response.json::<T>().await.map_err(|err| {
            if err.is_timeout() {
                AppError::Timeout(format!("Zendesk {what} call timed out"))
            } else {
                self.failure(
                    None,
                    format!("failed to parse Zendesk {what} response: {err}"),
                )
            }
        })
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[async_trait]
impl HelpdeskService for ZendeskClient {
    async fn exchange_code(&self, code: &str) -> AppResult<SecretString> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::InvalidRequest(
                "authorization code must not be empty".to_string(),
            ));
        }

        let request_body = TokenExchangeRequest {
            grant_type: "authorization_code",
            code,
            client_id: &self.config.client_id,
            client_secret: self.config.client_secret.expose_secret(),
            redirect_uri: &self.config.redirect_uri,
            scope: &self.config.scope,
        };

        debug!(endpoint = %self.config.token_uri, "exchanging authorization code");
        let call = Call::Authorization;
        let response = self
            .http
            .post(&self.config.token_uri)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| call.transport("token exchange", err))?;

        let payload: TokenExchangeResponse = call.decode("token exchange", response).await?;
        if payload.access_token.trim().is_empty() {
            return Err(call.failure(None, "token exchange returned an empty access token".to_string()));
        }
        Ok(SecretString::new(payload.access_token.into_boxed_str()))
    }

    async fn current_user(&self, token: &SecretString) -> AppResult<UserIdentity> {
        let call = Call::Authorization;
        let endpoint = self.identity_endpoint();
        debug!(%endpoint, "verifying access token");
        let response = self
            .http
            .get(&endpoint)
            .header(AUTHORIZATION, Self::bearer(token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| call.transport("identity check", err))?;

        let payload: MeResponse = call.decode("identity check", response).await?;
        Ok(UserIdentity {
            name: payload.user.name,
        })
    }

    async fn list_tickets(&self, token: &SecretString) -> AppResult<Vec<TicketSummary>> {
        let call = Call::Tickets;
        let endpoint = self.tickets_endpoint();
        debug!(%endpoint, "listing tickets");
        let response = self
            .http
            .get(&endpoint)
            .header(AUTHORIZATION, Self::bearer(token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| call.transport("ticket listing", err))?;

        let payload: TicketsResponse = call.decode("ticket listing", response).await?;
        Ok(payload.tickets)
    }

    async fn create_ticket(
        &self,
        token: &SecretString,
        draft: &TicketDraft,
    ) -> AppResult<CreatedTicket> {
        let call = Call::Tickets;
        let endpoint = self.tickets_endpoint();
        debug!(%endpoint, priority = draft.priority.as_str(), "creating ticket");
        let response = self
            .http
            .post(&endpoint)
            .header(AUTHORIZATION, Self::bearer(token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&CreateTicketRequest { ticket: draft })
            .send()
            .await
            .map_err(|err| call.transport("ticket creation", err))?;

        let payload: CreateTicketResponse = call.decode("ticket creation", response).await?;
        Ok(CreatedTicket(payload.ticket))
    }
}

#[derive(Serialize)]
struct TokenExchangeRequest<'a> {
    grant_type: &'static str,
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    scope: &'a str,
}

#[derive(Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct MeResponse {
    user: ZendeskUser,
}

#[derive(Deserialize)]
struct ZendeskUser {
    name: String,
}

#[derive(Deserialize)]
struct TicketsResponse {
    tickets: Vec<TicketSummary>,
}

#[derive(Serialize)]
struct CreateTicketRequest<'a> {
    ticket: &'a TicketDraft,
}

#[derive(Deserialize)]
struct CreateTicketResponse {
    ticket: Value,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::ticket::{Comment, Priority, Requester};
    use crate::test_support::config_for;

    fn client(server: &MockServer) -> ZendeskClient {
        ZendeskClient::new(Arc::new(config_for(&server.uri()))).expect("client")
    }

    fn token(value: &str) -> SecretString {
        SecretString::new(value.to_string().into_boxed_str())
    }

    #[tokio::test]
    async fn exchanges_code_with_json_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/tokens"))
            .and(body_json(json!({
                "grant_type": "authorization_code",
                "code": "abc123",
                "client_id": "relay_app",
                "client_secret": "s3cret",
                "redirect_uri": "http://localhost:3004/callback",
                "scope": "users:read read users:write write"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-1",
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = client(&server).exchange_code("abc123").await.expect("token");
        assert_eq!(token.expose_secret(), "tok-1");
    }

    #[tokio::test]
    async fn surfaces_rejected_code_as_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/tokens"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant"
            })))
            .mount(&server)
            .await;

        let err = client(&server).exchange_code("stale").await.expect_err("rejected");
        match err {
            AppError::UpstreamAuth { status, message } => {
                assert_eq!(status, Some(400));
                assert!(message.contains("invalid_grant"));
                assert!(!message.contains("s3cret"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn reads_current_user_with_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/users/me.json"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": { "id": 1, "name": "Ada Lovelace" }
            })))
            .mount(&server)
            .await;

        let user = client(&server).current_user(&token("tok-1")).await.expect("user");
        assert_eq!(user.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn lists_tickets_in_source_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/tickets.json"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tickets": [
                    { "id": 3, "subject": "VPN", "status": "open", "priority": "high",
                      "url": "https://x/3.json", "description": "ignored" },
                    { "id": 1, "subject": "Mouse", "status": "new", "priority": null,
                      "url": "https://x/1.json" }
                ],
                "count": 2
            })))
            .mount(&server)
            .await;

        let tickets = client(&server).list_tickets(&token("tok-1")).await.expect("tickets");
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].id, 3);
        assert_eq!(tickets[0].priority.as_deref(), Some("high"));
        assert_eq!(tickets[1].id, 1);
        assert_eq!(tickets[1].priority, None);
    }

    #[tokio::test]
    async fn reports_listing_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/tickets.json"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let err = client(&server).list_tickets(&token("tok-1")).await.expect_err("forbidden");
        assert!(matches!(err, AppError::Upstream { status: Some(403), .. }));
    }

    #[tokio::test]
    async fn creates_ticket_with_wrapped_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/tickets.json"))
            .and(header("Authorization", "Bearer tok-1"))
            .and(body_json(json!({
                "ticket": {
                    "subject": "Printer jam",
                    "priority": "normal",
                    "comment": { "body": "third floor" },
                    "requester": { "name": "A", "email": "a@x.com" }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "ticket": { "id": 44, "priority": "normal", "url": "https://x/44.json" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let draft = TicketDraft {
            subject: "Printer jam".to_string(),
            priority: Priority::Normal,
            comment: Comment {
                body: "third floor".to_string(),
            },
            requester: Requester {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
            },
        };
        let created = client(&server)
            .create_ticket(&token("tok-1"), &draft)
            .await
            .expect("created");
        assert_eq!(created.id(), Some(44));
        assert_eq!(created.url(), Some("https://x/44.json"));
    }

    #[tokio::test]
    async fn slow_upstream_is_a_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/tickets.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "tickets": [] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let mut config = config_for(&server.uri());
        config.http_timeout = Duration::from_millis(200);
        let client = ZendeskClient::new(Arc::new(config)).expect("client");

        let err = client.list_tickets(&token("tok-1")).await.expect_err("timeout");
        assert!(matches!(err, AppError::Timeout(_)));
    }

    #[test]
    fn truncates_long_error_bodies() {
        let body = "x".repeat(MAX_ERROR_BODY + 50);
        assert_eq!(truncate(&body).len(), MAX_ERROR_BODY);
        assert_eq!(truncate("short"), "short");
    }
}
