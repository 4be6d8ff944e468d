use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{HelpdeskService, NotificationService, TokenStore};

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub token_store: Arc<dyn TokenStore>,
    pub helpdesk: Arc<dyn HelpdeskService>,
    /// `None` when no chat webhook is configured.
    pub notifier: Option<Arc<dyn NotificationService>>,
}

impl AppContext {
    pub fn new(
        config: Arc<AppConfig>,
        token_store: Arc<dyn TokenStore>,
        helpdesk: Arc<dyn HelpdeskService>,
        notifier: Option<Arc<dyn NotificationService>>,
    ) -> Self {
        Self {
            config,
            token_store,
            helpdesk,
            notifier,
        }
    }
}
