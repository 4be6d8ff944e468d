use serde::Serialize;

use crate::domain::ticket::{CreatedTicket, TicketDraft};

const ALERT_COLOR: &str = "#f31111";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub text: String,
    pub color: String,
}

impl NotificationMessage {
    /// Builds the chat alert for a freshly created ticket, or `None` when the
    /// priority the helpdesk recorded does not warrant one.
    pub fn for_created_ticket(draft: &TicketDraft, created: &CreatedTicket) -> Option<Self> {
        if !created.priority()?.is_escalated() {
            return None;
        }

        let url = created.url().unwrap_or("<unknown>");
        Some(Self {
            text: format!(
                "New Urgent Zendesk Ticket: {}\nTicket Url: {}",
                draft.subject, url
            ),
            attachments: vec![Attachment {
                text: format!(
                    "Priority: {}\nRequester Name: {}\nRequester Email: {}",
                    draft.priority.as_str(),
                    draft.requester.name,
                    draft.requester.email
                ),
                color: ALERT_COLOR.to_string(),
            }],
        })
    }
}
