use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::services::TokenStore;

/// Process-wide single slot. Lost on restart.
#[derive(Default)]
pub struct InMemoryTokenStore {
    slot: RwLock<Option<SecretString>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn set(&self, token: SecretString) {
        *self.slot.write().await = Some(token);
    }

    async fn get(&self) -> Option<SecretString> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|token| SecretString::new(token.expose_secret().into()))
    }
}
