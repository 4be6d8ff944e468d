use url::form_urlencoded;

use crate::config::AppConfig;

/// Identity of the helpdesk user the bearer token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub name: String,
}

/// Consent screen URL the browser is sent to from `GET /`.
///
/// The redirect target goes out as `redirectUri`, which is the name the
/// registered helpdesk application was set up against.
pub fn authorization_url(config: &AppConfig) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("response_type", &config.response_type)
        .append_pair("redirectUri", &config.redirect_uri)
        .append_pair("client_id", &config.client_id)
        .append_pair("scope", &config.scope)
        .finish();
    let base = config.authorization_uri.trim_end_matches('?');
    format!("{base}?{query}")
}

pub fn welcome_page(identity: &UserIdentity) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Home</title>
</head>
<body>
    <p>Login Successful. Welcome {}!</p>
</body>
</html>
"#,
        escape_html(&identity.name)
    )
}

pub fn failure_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Login Failed</title>
</head>
<body>
    <p>Login Failed. {}</p>
</body>
</html>
"#,
        escape_html(message)
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
