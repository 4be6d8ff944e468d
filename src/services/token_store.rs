use async_trait::async_trait;
use secrecy::SecretString;

/// Holds the bearer token used for helpdesk calls.
///
/// The in-memory store keeps a single slot shared by every caller, so the
/// most recent authorization wins.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn set(&self, token: SecretString);
    async fn get(&self) -> Option<SecretString>;
}
