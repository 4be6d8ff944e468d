use std::sync::Arc;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::infra::memory_token::InMemoryTokenStore;
use crate::infra::slack::SlackWebhook;
use crate::infra::zendesk::ZendeskClient;
use crate::services::NotificationService;

pub const WEBHOOK_PATH: &str = "/hooks/desk";

/// Configuration pointing both the helpdesk and the chat webhook at `base_uri`.
pub fn config_for(base_uri: &str) -> AppConfig {
    let webhook = format!("{base_uri}{WEBHOOK_PATH}");
    AppConfig::from_lookup(|key| match key {
        "ZENDESK_CLIENT_ID" => Some("relay_app".to_string()),
        "ZENDESK_CLIENT_SECRET" => Some("s3cret".to_string()),
        "ZENDESK_BASE_URL" => Some(base_uri.to_string()),
        "SLACK_WEBHOOK_URL" => Some(webhook.clone()),
        _ => None,
    })
    .expect("test config")
}

pub fn context_for(base_uri: &str) -> AppContext {
    context_from(config_for(base_uri))
}

pub fn context_from(config: AppConfig) -> AppContext {
    let config = Arc::new(config);
    let helpdesk = ZendeskClient::new(config.clone()).expect("zendesk client");
    let notifier = config.webhook_url.clone().map(|url| {
        Arc::new(SlackWebhook::new(url, config.http_timeout).expect("webhook client"))
            as Arc<dyn NotificationService>
    });
    AppContext::new(
        config,
        Arc::new(InMemoryTokenStore::new()),
        Arc::new(helpdesk),
        notifier,
    )
}
