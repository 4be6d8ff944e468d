use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "urgent" => Some(Priority::Urgent),
            "high" => Some(Priority::High),
            "normal" => Some(Priority::Normal),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Urgent and high tickets are announced in chat.
    pub fn is_escalated(&self) -> bool {
        matches!(self, Priority::Urgent | Priority::High)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub body: String,
}

/// Body accepted by `POST /create-ticket`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTicketRequest {
    pub subject: String,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Option<Priority>,
    pub comment: Comment,
    pub requester: Requester,
}

/// Accepts any casing; `null` and blank values mean "use the default".
fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Priority::from_str(value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unknown priority `{value}`"))),
    }
}

/// Ticket fields as sent to the helpdesk, with the default priority applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketDraft {
    pub subject: String,
    pub priority: Priority,
    pub comment: Comment,
    pub requester: Requester,
}

impl From<NewTicketRequest> for TicketDraft {
    fn from(request: NewTicketRequest) -> Self {
        Self {
            subject: request.subject,
            priority: request.priority.unwrap_or_default(),
            comment: request.comment,
            requester: request.requester,
        }
    }
}

/// Minimal ticket shape relayed by `GET /tickets`. Absent upstream fields stay `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub id: u64,
    pub subject: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub url: Option<String>,
}

/// Ticket as returned by the helpdesk after creation, relayed verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTicket(pub Value);

impl CreatedTicket {
    pub fn priority(&self) -> Option<Priority> {
        self.0
            .get("priority")
            .and_then(Value::as_str)
            .and_then(Priority::from_str)
    }

    pub fn url(&self) -> Option<&str> {
        self.0.get("url").and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}
