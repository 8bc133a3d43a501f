pub mod parse;
pub mod types;

use crate::auth::detect::RejectionDetector;
use crate::auth::types::Credentials;
use crate::config::{PluginConfig, SiteApi};
use crate::constants::{markers, paths};
use crate::errors::{authentication_required_error, json_error, page_limit_error, parse_error};
use crate::galaxy::types::Game;
use crate::http::Transport;
use crate::library::types::{LegacyCollectionResponse, UserInfoResponse};

/// Owned games for the given session
///
/// Fails with `AuthenticationRequired` when the site answers with a rejection
/// page instead of the collection.
pub(crate) async fn get_owned_games(
    transport: &dyn Transport,
    config: &PluginConfig,
    detector: &RejectionDetector,
    credentials: &Credentials,
) -> Result<Vec<Game>, crate::Error> {
    match config.api() {
        SiteApi::Showcase => get_showcase(transport, config, detector, credentials).await,
        SiteApi::UserInfo => get_user_collection(transport, config, detector, credentials).await,
        SiteApi::Legacy => get_legacy_collection(transport, config, detector, credentials).await,
    }
}

async fn get_showcase(
    transport: &dyn Transport,
    config: &PluginConfig,
    detector: &RejectionDetector,
    credentials: &Credentials,
) -> Result<Vec<Game>, crate::Error> {
    let mut games = Vec::new();
    let mut page: u32 = 1;
    loop {
        if page > *config.max_pages() {
            log::error!("Showcase still not exhausted after {} pages", page - 1);
            return Err(page_limit_error(*config.max_pages()));
        }
        log::debug!("Getting showcase page {}", page);
        let body = transport.get(config.showcase_url(page)?, credentials).await?;
        if body.contains(markers::SHOWCASE_EMPTY) {
            break;
        }
        detector.ensure_accepted(&body)?;
        let entries = parse::showcase_page(&body, config.base_url(), *config.id_source());
        if entries.is_empty() {
            // Neither games nor the end marker, the markup changed under us
            return Err(parse_error(format!("showcase page {} lists no games", page)));
        }
        log::debug!("Showcase page {} lists {} games", page, entries.len());
        games.extend(entries);
        page += 1;
    }
    log::info!("Found {} owned games", games.len());
    Ok(games)
}

async fn get_user_collection(
    transport: &dyn Transport,
    config: &PluginConfig,
    detector: &RejectionDetector,
    credentials: &Credentials,
) -> Result<Vec<Game>, crate::Error> {
    log::debug!("Getting user collection");
    let body = transport
        .get(config.url(paths::USER_INFO)?, credentials)
        .await?;
    detector.ensure_accepted(&body)?;
    let info: UserInfoResponse = serde_json::from_str(&body).map_err(json_error)?;
    if info.username().is_none() {
        return Err(authentication_required_error());
    }
    let Some(showcase) = info.showcase_content else {
        log::debug!("User info has no showcase content");
        return Ok(Vec::new());
    };
    let games = parse::user_collection(showcase.content.user_collection, *config.id_source());
    log::info!("Found {} owned games", games.len());
    Ok(games)
}

async fn get_legacy_collection(
    transport: &dyn Transport,
    config: &PluginConfig,
    detector: &RejectionDetector,
    credentials: &Credentials,
) -> Result<Vec<Game>, crate::Error> {
    log::debug!("Getting legacy showcase collection");
    let body = transport
        .get(config.url(paths::LEGACY_SHOWCASE)?, credentials)
        .await?;
    detector.ensure_accepted(&body)?;
    let data: LegacyCollectionResponse = serde_json::from_str(&body).map_err(json_error)?;
    Ok(parse::legacy_collection(&data.html))
}
