use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Browser cookie as reported by the host's login web view
#[derive(Serialize, Deserialize, Clone, Getters, Debug, PartialEq, Eq)]
pub struct Cookie {
    pub(crate) name: String,
    pub(crate) value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) path: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug, PartialEq, Eq)]
pub struct AuthParams {
    window_title: String,
    window_width: u32,
    window_height: u32,
    start_uri: String,
    end_uri_regex: String,
}

impl AuthParams {
    pub(crate) fn new(
        window_title: String,
        window_width: u32,
        window_height: u32,
        start_uri: String,
        end_uri_regex: String,
    ) -> Self {
        Self {
            window_title,
            window_width,
            window_height,
            start_uri,
            end_uri_regex,
        }
    }
}

/// Instructs the host to open a login web view
#[derive(Serialize, Deserialize, Clone, Getters, Debug, PartialEq, Eq)]
pub struct NextStep {
    next_step: String,
    auth_params: AuthParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cookies: Option<Vec<Cookie>>,
    /// Scripts keyed by the uri regex of the page they run on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    js: Option<serde_json::Map<String, serde_json::Value>>,
}

impl NextStep {
    pub(crate) fn web_session(auth_params: AuthParams) -> Self {
        Self {
            next_step: String::from("web_session"),
            auth_params,
            cookies: None,
            js: None,
        }
    }

    pub(crate) fn with_cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = Some(cookies);
        self
    }

    pub(crate) fn with_js(mut self, uri_regex: String, script: String) -> Self {
        let mut js = serde_json::Map::new();
        js.insert(
            uri_regex,
            serde_json::Value::Array(vec![serde_json::Value::String(script)]),
        );
        self.js = Some(js);
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug, PartialEq, Eq)]
pub struct Authentication {
    user_id: String,
    user_name: String,
}

impl Authentication {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }
}

/// Result of `authenticate` and `pass_login_credentials`
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum AuthOutcome {
    Authenticated(Authentication),
    NextStep(NextStep),
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LicenseType {
    SinglePurchase,
    FreeToPlay,
    OtherUserLicense,
    Unknown,
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug, PartialEq, Eq)]
pub struct LicenseInfo {
    license_type: LicenseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug, PartialEq, Eq)]
pub struct Dlc {
    dlc_id: String,
    dlc_title: String,
    license_info: LicenseInfo,
}

/// Owned title reported to the host
#[derive(Serialize, Deserialize, Clone, Getters, Debug, PartialEq, Eq)]
pub struct Game {
    game_id: String,
    game_title: String,
    dlcs: Vec<Dlc>,
    license_info: LicenseInfo,
}

impl Game {
    /// IndieGala only sells single purchase licenses and exposes no DLC data
    pub fn single_purchase(game_id: impl Into<String>, game_title: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            game_title: game_title.into(),
            dlcs: Vec::new(),
            license_info: LicenseInfo {
                license_type: LicenseType::SinglePurchase,
                owner: None,
            },
        }
    }
}
