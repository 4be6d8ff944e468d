use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::{AppError, AppResult};

const DEFAULT_SUBDOMAIN: &str = "1218globalhelp";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3004/callback";
const DEFAULT_SCOPE: &str = "users:read read users:write write";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const RESPONSE_TYPE: &str = "code";

#[derive(Debug)]
pub struct AppConfig {
    pub subdomain: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub authorization_uri: String,
    pub token_uri: String,
    pub redirect_uri: String,
    pub scope: String,
    pub response_type: String,
    pub webhook_url: Option<String>,
    /// Root of the helpdesk REST API, e.g. `https://acme.zendesk.com`.
    pub api_base_url: String,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let client_id = read("ZENDESK_CLIENT_ID").ok_or_else(|| {
            AppError::Configuration("ZENDESK_CLIENT_ID must be set".to_string())
        })?;
        let client_secret = read("ZENDESK_CLIENT_SECRET").ok_or_else(|| {
            AppError::Configuration("ZENDESK_CLIENT_SECRET must be set".to_string())
        })?;

        let subdomain = read("ZENDESK_SUBDOMAIN").unwrap_or_else(|| DEFAULT_SUBDOMAIN.to_string());
        let api_base_url = read("ZENDESK_BASE_URL")
            .unwrap_or_else(|| format!("https://{subdomain}.zendesk.com"))
            .trim_end_matches('/')
            .to_string();

        let http_timeout = match read("DESK_RELAY_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    AppError::Configuration(format!(
                        "DESK_RELAY_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(AppError::Configuration(
                        "DESK_RELAY_HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            authorization_uri: format!("{api_base_url}/oauth/authorizations/new"),
            token_uri: format!("{api_base_url}/oauth/tokens"),
            redirect_uri: read("ZENDESK_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            scope: read("ZENDESK_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            response_type: RESPONSE_TYPE.to_string(),
            webhook_url: read("SLACK_WEBHOOK_URL"),
            client_id,
            client_secret: SecretString::new(client_secret.into_boxed_str()),
            subdomain,
            api_base_url,
            http_timeout,
        })
    }
}
