use async_trait::async_trait;

use crate::domain::notification::NotificationMessage;
use crate::error::AppResult;

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify(&self, message: &NotificationMessage) -> AppResult<()>;
}
