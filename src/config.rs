use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{self, paths};
use crate::errors::{config_error, json_error};
use crate::Error;

/// Which generation of the IndieGala site the plugin talks to
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SiteApi {
    /// `get_user_info` + `showcase_collection` JSON envelopes with embedded markup
    Legacy,
    /// Homepage scraping + paginated `library/showcase/{page}` markup
    #[default]
    Showcase,
    /// `login_new/user_info` JSON carrying the whole collection
    UserInfo,
}

/// Field used as the stable game identifier reported to the host
///
/// The host de-duplicates games by this id, so switching it on an existing
/// install makes every game look new.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameIdSource {
    #[default]
    Slug,
    Title,
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct LoginWindow {
    title: String,
    width: u32,
    height: u32,
}

impl Default for LoginWindow {
    fn default() -> Self {
        Self {
            title: String::from("Login to Indie Gala"),
            width: 1000,
            height: 800,
        }
    }
}

/// Subset of the plugin's `manifest.json` the host reads to load it
#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct Manifest {
    name: String,
    platform: String,
    guid: String,
    version: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    url: String,
    script: String,
}

/// Immutable settings, built once when the plugin process starts
#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
#[serde(default)]
pub struct PluginConfig {
    version: String,
    base_url: Url,
    api: SiteApi,
    id_source: GameIdSource,
    max_pages: u32,
    login_window: LoginWindow,
    user_agent: String,
    /// Script the host runs on the completion page of the security check login
    security_check_js: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            version: String::from(env!("CARGO_PKG_VERSION")),
            base_url: constants::INDIEGALA_URL.clone(),
            api: SiteApi::default(),
            id_source: GameIdSource::default(),
            max_pages: constants::DEFAULT_MAX_PAGES,
            login_window: LoginWindow::default(),
            user_agent: String::from(constants::DEFAULT_USER_AGENT),
            security_check_js: None,
        }
    }
}

impl PluginConfig {
    /// Defaults, with the version taken from the plugin manifest
    pub fn from_manifest(manifest: &str) -> Result<Self, Error> {
        let manifest: Manifest = serde_json::from_str(manifest).map_err(json_error)?;
        if manifest.platform != constants::PLATFORM {
            return Err(config_error(format!(
                "manifest is for platform {}",
                manifest.platform
            )));
        }
        Ok(Self {
            version: manifest.version,
            ..Self::default()
        })
    }

    pub fn from_json(data: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(data).map_err(json_error)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_api(mut self, api: SiteApi) -> Self {
        self.api = api;
        self
    }

    pub fn with_id_source(mut self, id_source: GameIdSource) -> Self {
        self.id_source = id_source;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_security_check_js(mut self, js: impl Into<String>) -> Self {
        self.security_check_js = Some(js.into());
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.base_url.host_str().is_none() {
            return Err(config_error("base_url has no host"));
        }
        if self.max_pages == 0 {
            return Err(config_error("max_pages must be positive"));
        }
        Ok(())
    }

    /// Absolute url for a site path
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(config_error)
    }

    pub fn showcase_url(&self, page: u32) -> Result<Url, Error> {
        self.url(&format!("{}/{}", paths::SHOWCASE, page))
    }
}
