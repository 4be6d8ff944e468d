use std::sync::Arc;

use secrecy::SecretString;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::context::AppContext;
use crate::domain::notification::NotificationMessage;
use crate::domain::ticket::{CreatedTicket, NewTicketRequest, TicketDraft, TicketSummary};
use crate::error::{AppError, AppResult};
use crate::services::NotificationService;

pub struct TicketCreationOutcome {
    pub ticket: CreatedTicket,
    /// Background delivery of the chat alert, when one was sent.
    pub notification: Option<JoinHandle<()>>,
}

async fn require_token(ctx: &AppContext) -> AppResult<SecretString> {
    ctx.token_store.get().await.ok_or_else(|| {
        warn!("helpdesk call attempted before authorization");
        AppError::NotAuthenticated
    })
}

pub async fn list_tickets(ctx: &AppContext) -> AppResult<Vec<TicketSummary>> {
    let token = require_token(ctx).await?;
    let tickets = ctx.helpdesk.list_tickets(&token).await?;
    info!(count = tickets.len(), "tickets listed");
    Ok(tickets)
}

pub async fn create_ticket(
    ctx: &AppContext,
    request: NewTicketRequest,
) -> AppResult<TicketCreationOutcome> {
    let token = require_token(ctx).await?;

    let draft = TicketDraft::from(request);
    if draft.subject.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "ticket subject must not be empty".to_string(),
        ));
    }

    let ticket = ctx.helpdesk.create_ticket(&token, &draft).await?;
    info!(id = ?ticket.id(), priority = draft.priority.as_str(), "ticket created");

    let notification = match NotificationMessage::for_created_ticket(&draft, &ticket) {
        Some(message) => match &ctx.notifier {
            Some(notifier) => Some(spawn_notification(notifier.clone(), message)),
            None => {
                warn!(id = ?ticket.id(), "escalated ticket created but no chat webhook is configured");
                None
            }
        },
        None => None,
    };

    Ok(TicketCreationOutcome {
        ticket,
        notification,
    })
}

/// Delivers the alert off the request path; failures are only logged.
fn spawn_notification(
    notifier: Arc<dyn NotificationService>,
    message: NotificationMessage,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify(&message).await {
            Ok(()) => info!("chat notification delivered"),
            Err(err) => error!(error = %err, "chat notification failed"),
        }
    })
}
