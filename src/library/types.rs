use serde::{Deserialize, Serialize};

/// Payload of `login_new/user_info`
#[derive(Serialize, Deserialize, Debug)]
pub struct UserInfoResponse {
    #[serde(rename = "_indiegala_username", default)]
    pub username: Option<String>,
    #[serde(default)]
    pub showcase_content: Option<ShowcaseContent>,
}

impl UserInfoResponse {
    /// Logged-out responses carry an empty or missing username
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ShowcaseContent {
    pub content: CollectionContent,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CollectionContent {
    #[serde(default)]
    pub user_collection: Vec<CollectionEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CollectionEntry {
    pub prod_slugged_name: String,
    pub prod_name: String,
    #[serde(default)]
    pub prod_dev_namespace: Option<String>,
    #[serde(default)]
    pub prod_id_key_name: Option<String>,
}

/// Payload of the legacy `get_user_info` endpoint
#[derive(Serialize, Deserialize, Debug)]
pub struct LegacyUserInfo {
    pub profile: String,
    pub email: String,
}

/// Payload of the legacy `showcase_collection` endpoint, markup wrapped in JSON
#[derive(Serialize, Deserialize, Debug)]
pub struct LegacyCollectionResponse {
    pub html: String,
}
