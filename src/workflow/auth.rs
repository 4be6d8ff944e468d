use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::context::AppContext;
use crate::domain::auth::{UserIdentity, authorization_url};
use crate::error::AppResult;

pub fn authorization_redirect(ctx: &AppContext) -> String {
    authorization_url(&ctx.config)
}

/// Exchanges the code, stores the resulting token and confirms it by
/// looking up the user it belongs to.
pub async fn complete_authorization(ctx: &AppContext, code: &str) -> AppResult<UserIdentity> {
    let token = ctx.helpdesk.exchange_code(code).await?;
    let verify_with = SecretString::new(token.expose_secret().into());

    ctx.token_store.set(token).await;
    info!("access token stored");

    let identity = ctx.helpdesk.current_user(&verify_with).await?;
    info!(user = %identity.name, "access token verified");
    Ok(identity)
}
