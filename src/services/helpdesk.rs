use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::auth::UserIdentity;
use crate::domain::ticket::{CreatedTicket, TicketDraft, TicketSummary};
use crate::error::AppResult;

#[async_trait]
pub trait HelpdeskService: Send + Sync {
    /// Trades an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> AppResult<SecretString>;
    async fn current_user(&self, token: &SecretString) -> AppResult<UserIdentity>;
    async fn list_tickets(&self, token: &SecretString) -> AppResult<Vec<TicketSummary>>;
    async fn create_ticket(
        &self,
        token: &SecretString,
        draft: &TicketDraft,
    ) -> AppResult<CreatedTicket>;
}
