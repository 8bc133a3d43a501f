use soup::prelude::*;
use url::Url;

use crate::config::{PluginConfig, SiteApi};
use crate::constants::{paths, selectors};
use crate::errors::{authentication_required_error, json_error};
use crate::galaxy::types::{AuthParams, Authentication, NextStep};
use crate::http::Transport;
use crate::library::types::{LegacyUserInfo, UserInfoResponse};
use crate::Error;

use self::detect::RejectionDetector;
use self::types::Credentials;

// Session handling and login directives
pub mod detect;
pub mod types;

/// Pattern matching the site's homepage, which the login flow lands on once done
///
/// Accepts an optional trailing slash and fragment, e.g. the `#_=_` left by
/// social logins.
pub fn end_uri_regex(base_url: &Url) -> String {
    let origin = base_url.origin().ascii_serialization();
    format!(r"^{}/?(#.*)?$", regex::escape(&origin))
}

fn auth_params(config: &PluginConfig, start_uri: Url) -> AuthParams {
    let window = config.login_window();
    AuthParams::new(
        window.title().clone(),
        *window.width(),
        *window.height(),
        start_uri.to_string(),
        end_uri_regex(config.base_url()),
    )
}

/// Fresh interactive login
pub(crate) fn login_step(config: &PluginConfig) -> Result<NextStep, Error> {
    Ok(NextStep::web_session(auth_params(
        config,
        config.url(paths::LOGIN)?,
    )))
}

/// Login that starts on a page surfacing the site's security check,
/// seeded with the cookies of the rejected session
pub(crate) fn security_check_step(
    config: &PluginConfig,
    credentials: &Credentials,
) -> Result<NextStep, Error> {
    let params = auth_params(config, config.url(paths::SECURITY_CHECK)?);
    let end_uri_regex = params.end_uri_regex().clone();
    let domain = config.base_url().host_str().unwrap_or_default();
    let mut step = NextStep::web_session(params).with_cookies(credentials.to_cookies(domain));
    if let Some(js) = config.security_check_js() {
        step = step.with_js(end_uri_regex, js.clone());
    }
    Ok(step)
}

/// Proves the session is live by fetching a page only logged-in users get
pub(crate) async fn validate_session(
    transport: &dyn Transport,
    config: &PluginConfig,
    detector: &RejectionDetector,
    credentials: &Credentials,
) -> Result<Authentication, Error> {
    match config.api() {
        SiteApi::Showcase => {
            let body = transport.get(config.url("")?, credentials).await?;
            detector.ensure_accepted(&body)?;
            let username = homepage_username(&body).ok_or_else(authentication_required_error)?;
            Ok(Authentication::new(username.clone(), username))
        }
        SiteApi::UserInfo => {
            let body = transport
                .get(config.url(paths::USER_INFO)?, credentials)
                .await?;
            detector.ensure_accepted(&body)?;
            let info: UserInfoResponse = serde_json::from_str(&body).map_err(json_error)?;
            let username = info.username().ok_or_else(authentication_required_error)?;
            Ok(Authentication::new(username, username))
        }
        SiteApi::Legacy => {
            let body = transport
                .get(config.url(paths::LEGACY_USER_INFO)?, credentials)
                .await?;
            detector.ensure_accepted(&body)?;
            let info: LegacyUserInfo = serde_json::from_str(&body).map_err(json_error)?;
            Ok(Authentication::new(info.profile, info.email))
        }
    }
}

fn homepage_username(html: &str) -> Option<String> {
    let soup = Soup::new(html);
    let node = soup.class(selectors::USERNAME_CLASS).find()?;
    let username = node.text().trim().to_string();
    if username.is_empty() {
        return None;
    }
    Some(username)
}
