use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::galaxy::types::Cookie;

/// Session cookies, cookie name -> value
///
/// Stored by the host as a flat JSON object and replaced wholesale on re-login.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    /// Builds credentials from the login browser's cookies, dropping nameless ones
    pub fn from_cookies<'a, I>(cookies: I) -> Self
    where
        I: IntoIterator<Item = &'a Cookie>,
    {
        let map = cookies
            .into_iter()
            .filter(|cookie| !cookie.name.is_empty())
            .map(|cookie| (cookie.name.clone(), cookie.value.clone()))
            .collect();
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Keeps only the named cookie
    pub fn only(&self, name: &str) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(key, _)| key.as_str() == name)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Value for the `Cookie` request header
    pub fn cookie_header(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Cookies to seed a login web view with
    pub fn to_cookies(&self, domain: &str) -> Vec<Cookie> {
        self.0
            .iter()
            .map(|(name, value)| Cookie::new(name.as_str(), value.as_str()).with_domain(domain))
            .collect()
    }
}

impl FromIterator<(String, String)> for Credentials {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().filter(|(name, _)| !name.is_empty()).collect())
    }
}

impl From<BTreeMap<String, String>> for Credentials {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Credentials> for BTreeMap<String, String> {
    fn from(credentials: Credentials) -> Self {
        credentials.0
    }
}

// Values are session secrets, only names are printed
impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nameless_cookies_dropped() {
        let cookies = vec![
            Cookie::new("auth", "abc"),
            Cookie::new("", "orphan"),
            Cookie::new("incap_ses_1", "xyz"),
        ];
        let credentials = Credentials::from_cookies(&cookies);
        assert_eq!(credentials.len(), 2);
        assert_eq!(credentials.get("auth"), Some("abc"));
        assert_eq!(credentials.cookie_header(), "auth=abc; incap_ses_1=xyz");
    }

    #[test]
    fn stored_as_flat_object() {
        let credentials: Credentials =
            serde_json::from_str(r#"{"auth": "abc", "sid": "1"}"#).unwrap();
        assert_eq!(credentials.only("auth").cookie_header(), "auth=abc");
        assert_eq!(
            serde_json::to_string(&credentials).unwrap(),
            r#"{"auth":"abc","sid":"1"}"#
        );
    }

    #[test]
    fn stored_nameless_cookie_dropped() {
        let credentials: Credentials =
            serde_json::from_str(r#"{"": "x", "auth": "abc"}"#).unwrap();
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials.cookie_header(), "auth=abc");
    }

    #[test]
    fn debug_hides_values() {
        let credentials: Credentials = [("auth".to_string(), "secret".to_string())]
            .into_iter()
            .collect();
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("auth"));
        assert!(!printed.contains("secret"));
    }
}
