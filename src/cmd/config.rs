use std::env;

use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

struct Field {
    label: &'static str,
    key: &'static str,
    secret: bool,
}

const FIELDS: &[Field] = &[
    Field {
        label: "Zendesk subdomain",
        key: "ZENDESK_SUBDOMAIN",
        secret: false,
    },
    Field {
        label: "Zendesk base URL",
        key: "ZENDESK_BASE_URL",
        secret: false,
    },
    Field {
        label: "OAuth client id",
        key: "ZENDESK_CLIENT_ID",
        secret: false,
    },
    Field {
        label: "OAuth client secret",
        key: "ZENDESK_CLIENT_SECRET",
        secret: true,
    },
    Field {
        label: "OAuth redirect URI",
        key: "ZENDESK_REDIRECT_URI",
        secret: false,
    },
    Field {
        label: "OAuth scope",
        key: "ZENDESK_SCOPE",
        secret: false,
    },
    Field {
        label: "Chat webhook URL",
        key: "SLACK_WEBHOOK_URL",
        secret: true,
    },
    Field {
        label: "HTTP timeout (secs)",
        key: "DESK_RELAY_HTTP_TIMEOUT_SECS",
        secret: false,
    },
];

fn run_show() -> AppResult<()> {
    for line in describe(|key| env::var(key).ok()) {
        println!("{line}");
    }
    Ok(())
}

fn describe<F>(lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut lines = FIELDS
        .iter()
        .map(|field| {
            let value = lookup(field.key);
            let shown = if field.secret {
                mask_secret(&value)
            } else {
                display_value(&value)
            };
            format!("{} ({}): {}", field.label, field.key, shown)
        })
        .collect::<Vec<_>>();

    match AppConfig::from_lookup(&lookup) {
        Ok(config) => {
            lines.push(format!("Authorization URI: {}", config.authorization_uri));
            lines.push(format!("Token URI: {}", config.token_uri));
            lines.push("Configuration is complete.".to_string());
        }
        Err(err) => lines.push(format!("Configuration is incomplete: {err}")),
    }
    lines
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let prefix = token.chars().take(3).collect::<String>();
            let suffix = token.chars().skip(token.chars().count() - 3).collect::<String>();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_secrets() {
        assert_eq!(mask_secret(&Some("abcdefghij".to_string())), "abc***hij");
        assert_eq!(mask_secret(&Some("short".to_string())), "***");
        assert_eq!(mask_secret(&Some(String::new())), "<not set>");
        assert_eq!(mask_secret(&None), "<not set>");
    }

    #[test]
    fn describes_complete_configuration() {
        let lines = describe(|key| match key {
            "ZENDESK_CLIENT_ID" => Some("relay_app".to_string()),
            "ZENDESK_CLIENT_SECRET" => Some("super-secret-value".to_string()),
            _ => None,
        });

        assert!(lines.contains(&"OAuth client id (ZENDESK_CLIENT_ID): relay_app".to_string()));
        assert!(lines.contains(&"OAuth client secret (ZENDESK_CLIENT_SECRET): sup***lue".to_string()));
        assert!(lines.contains(&"Chat webhook URL (SLACK_WEBHOOK_URL): <not set>".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Configuration is complete."));
        assert!(lines.iter().all(|line| !line.contains("super-secret-value")));
    }

    #[test]
    fn reports_incomplete_configuration() {
        let lines = describe(|_| None);
        let last = lines.last().expect("summary line");
        assert!(last.starts_with("Configuration is incomplete"));
        assert!(last.contains("ZENDESK_CLIENT_ID"));
    }
}
