use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::auth::detect::RejectionDetector;
use crate::auth::types::Credentials;
use crate::config::{PluginConfig, SiteApi};
use crate::constants::{self, LEGACY_SESSION_COOKIE};
use crate::errors::authentication_required_error;
use crate::galaxy::types::{AuthOutcome, Cookie, Game};
use crate::galaxy::Host;
use crate::http::{ReqwestTransport, Transport};
use crate::{auth, errors, library};

/// Entry point, one instance per plugin process
#[derive(Clone)]
pub struct Plugin {
    config: Arc<PluginConfig>,
    transport: Arc<dyn Transport>,
    host: Arc<dyn Host>,
    detector: Arc<RejectionDetector>,
    session: Arc<Mutex<Option<Credentials>>>,
}

impl Plugin {
    pub fn new(config: PluginConfig, host: Arc<dyn Host>) -> Result<Self, errors::Error> {
        let transport = ReqwestTransport::new(config.user_agent())?;
        Ok(Self::with_transport(config, host, Arc::new(transport)))
    }

    pub fn with_transport(
        config: PluginConfig,
        host: Arc<dyn Host>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            host,
            detector: Arc::new(RejectionDetector::default()),
            session: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the default set of rejection page checks
    pub fn with_detector(mut self, detector: RejectionDetector) -> Self {
        self.detector = Arc::new(detector);
        self
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn platform(&self) -> &'static str {
        constants::PLATFORM
    }

    pub fn version(&self) -> &str {
        self.config.version()
    }

    fn install_session(&self, credentials: Credentials) {
        log::debug!("Installing session with {} cookies", credentials.len());
        *self.session.lock() = Some(credentials);
    }

    fn session(&self) -> Option<Credentials> {
        self.session.lock().clone()
    }

    /// Returns the active session or `AuthenticationRequired`
    pub fn ensure_auth(&self) -> Result<Credentials, errors::Error> {
        self.session()
            .filter(|credentials| !credentials.is_empty())
            .ok_or_else(authentication_required_error)
    }

    /// Validate stored credentials, or ask the host for an interactive login
    /// when there are none
    pub async fn authenticate(
        &self,
        stored_credentials: Option<Credentials>,
    ) -> Result<AuthOutcome, errors::Error> {
        let credentials = match stored_credentials {
            Some(credentials) if !credentials.is_empty() => credentials,
            _ => {
                log::info!("No stored credentials, starting interactive login");
                return Ok(AuthOutcome::NextStep(auth::login_step(&self.config)?));
            }
        };
        self.install_session(credentials);
        self.validate().await
    }

    /// Called by the host once the login web view reached the end uri
    pub async fn pass_login_credentials(
        &self,
        step: &str,
        credentials: &HashMap<String, String>,
        cookies: &[Cookie],
    ) -> Result<AuthOutcome, errors::Error> {
        log::debug!(
            "Login step {} finished at {:?}",
            step,
            credentials.get("end_uri")
        );
        let mut session = Credentials::from_cookies(cookies);
        if matches!(self.config.api(), SiteApi::Legacy) {
            session = session.only(LEGACY_SESSION_COOKIE);
        }
        if session.is_empty() {
            log::warn!("Login finished without session cookies, restarting login");
            *self.session.lock() = None;
            return Ok(AuthOutcome::NextStep(auth::login_step(&self.config)?));
        }
        log::info!(
            "Captured cookies: {}",
            session.names().collect::<Vec<_>>().join(", ")
        );
        self.host.store_credentials(&session);
        self.install_session(session);
        self.validate().await
    }

    async fn validate(&self) -> Result<AuthOutcome, errors::Error> {
        let credentials = self.ensure_auth()?;
        let result = auth::validate_session(
            self.transport.as_ref(),
            &self.config,
            &self.detector,
            &credentials,
        )
        .await;
        match result {
            Ok(authentication) => {
                log::info!("Logged in as {}", authentication.user_name());
                Ok(AuthOutcome::Authenticated(authentication))
            }
            Err(err) if err.is_authentication_required() => {
                log::warn!("Stored session rejected, requesting security check login");
                *self.session.lock() = None;
                Ok(AuthOutcome::NextStep(auth::security_check_step(
                    &self.config,
                    &credentials,
                )?))
            }
            Err(err) => Err(err),
        }
    }

    /// Every game on the user's showcase
    /// Requires authentication
    pub async fn get_owned_games(&self) -> Result<Vec<Game>, errors::Error> {
        let credentials = self.ensure_auth()?;
        let result = library::get_owned_games(
            self.transport.as_ref(),
            &self.config,
            &self.detector,
            &credentials,
        )
        .await;
        match result {
            Err(err) if err.is_authentication_required() => {
                log::warn!("Lost authentication while reading the showcase");
                *self.session.lock() = None;
                self.host.lost_authentication();
                Err(err)
            }
            other => other,
        }
    }

    /// Drops the active session, the host forgets stored credentials on its own
    pub fn logout(&self) {
        log::info!("Logging out");
        *self.session.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingHost, ScriptedTransport};

    const HOMEPAGE: &str = r#"<html><body>
        <span class="username-text">gala_fan</span>
    </body></html>"#;
    const CHALLENGE: &str = r#"<html><head><script src="/_Incapsula_Resource?SWJIYLWA=5074a7"></script></head></html>"#;

    fn plugin(transport: &Arc<ScriptedTransport>, host: &Arc<RecordingHost>) -> Plugin {
        Plugin::with_transport(PluginConfig::default(), host.clone(), transport.clone())
    }

    fn stored() -> Credentials {
        [("auth".to_string(), "abc".to_string())]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn no_credentials_no_request() {
        let transport = Arc::new(ScriptedTransport::default());
        let host = Arc::new(RecordingHost::default());
        let plugin = plugin(&transport, &host);

        let outcome = plugin.authenticate(None).await.expect("authenticate failed");
        let AuthOutcome::NextStep(step) = outcome else {
            panic!("Expected a login step");
        };
        assert_eq!(
            step.auth_params().start_uri(),
            "https://www.indiegala.com/login"
        );
        let outcome = plugin
            .authenticate(Some(Credentials::default()))
            .await
            .expect("authenticate failed");
        assert!(!outcome.is_authenticated());
        assert!(transport.requests().is_empty());
        plugin.ensure_auth().expect_err("Session installed without credentials");
    }

    #[tokio::test]
    async fn stored_session_accepted() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.respond("https://www.indiegala.com/", HOMEPAGE);
        let host = Arc::new(RecordingHost::default());
        let plugin = plugin(&transport, &host);

        let outcome = plugin.authenticate(Some(stored())).await.unwrap();
        match outcome {
            AuthOutcome::Authenticated(auth) => {
                assert_eq!(auth.user_id(), "gala_fan");
                assert_eq!(auth.user_name(), "gala_fan");
            }
            AuthOutcome::NextStep(_) => panic!("Expected authentication"),
        }
        assert_eq!(transport.requests(), vec!["https://www.indiegala.com/"]);
        plugin.ensure_auth().expect("Session missing");
    }

    #[tokio::test]
    async fn stored_session_challenged() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.respond("https://www.indiegala.com/", CHALLENGE);
        let host = Arc::new(RecordingHost::default());
        let plugin = plugin(&transport, &host);

        let outcome = plugin.authenticate(Some(stored())).await.unwrap();
        let AuthOutcome::NextStep(step) = outcome else {
            panic!("Expected a security check step");
        };
        assert_eq!(
            step.auth_params().start_uri(),
            "https://www.indiegala.com/library"
        );
        let cookies = step.cookies().as_ref().expect("Cookies not carried over");
        assert_eq!(cookies[0].name(), "auth");
        assert_eq!(host.lost_count(), 0);
        plugin.ensure_auth().expect_err("Rejected session kept");
    }

    #[tokio::test]
    async fn login_stores_filtered_cookies() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.respond("https://www.indiegala.com/", HOMEPAGE);
        let host = Arc::new(RecordingHost::default());
        let plugin = plugin(&transport, &host);

        let cookies = vec![
            Cookie::new("auth", "abc"),
            Cookie::new("", "junk"),
            Cookie::new("incap_ses_42", "def"),
        ];
        let end_uri = HashMap::from([(
            "end_uri".to_string(),
            "https://www.indiegala.com/#_=_".to_string(),
        )]);
        let outcome = plugin
            .pass_login_credentials("1", &end_uri, &cookies)
            .await
            .unwrap();
        assert!(outcome.is_authenticated());

        let stored = host.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored[0].names().collect::<Vec<_>>(),
            vec!["auth", "incap_ses_42"]
        );
    }

    #[tokio::test]
    async fn legacy_login_keeps_auth_cookie() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.respond(
            "https://www.indiegala.com/get_user_info",
            r#"{"profile": "1234", "email": "fan@example.com"}"#,
        );
        let host = Arc::new(RecordingHost::default());
        let config = PluginConfig::default().with_api(SiteApi::Legacy);
        let plugin = Plugin::with_transport(config, host.clone(), transport.clone());

        let cookies = vec![Cookie::new("auth", "abc"), Cookie::new("other", "x")];
        let outcome = plugin
            .pass_login_credentials("1", &HashMap::new(), &cookies)
            .await
            .unwrap();
        let AuthOutcome::Authenticated(auth) = outcome else {
            panic!("Expected authentication");
        };
        assert_eq!(auth.user_id(), "1234");
        assert_eq!(auth.user_name(), "fan@example.com");
        assert_eq!(host.stored()[0].cookie_header(), "auth=abc");
    }

    #[tokio::test]
    async fn legacy_login_without_auth_cookie() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.respond(
            "https://www.indiegala.com/get_user_info",
            r#"{"status": "not logged"}"#,
        );
        let host = Arc::new(RecordingHost::default());
        let config = PluginConfig::default().with_api(SiteApi::Legacy);
        let plugin = Plugin::with_transport(config, host.clone(), transport.clone());

        let cookies = vec![Cookie::new("other", "x")];
        let outcome = plugin
            .pass_login_credentials("1", &HashMap::new(), &cookies)
            .await
            .expect("Missing cookie surfaced as an error");
        let AuthOutcome::NextStep(step) = outcome else {
            panic!("Expected a login step");
        };
        assert_eq!(
            step.auth_params().start_uri(),
            "https://www.indiegala.com/login"
        );
        assert!(transport.requests().is_empty());
        assert!(host.stored().is_empty());
        let err = plugin.ensure_auth().expect_err("Empty session installed");
        assert!(err.is_authentication_required());
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let transport = Arc::new(ScriptedTransport::default());
        let host = Arc::new(RecordingHost::default());
        let plugin = plugin(&transport, &host);

        let err = plugin
            .authenticate(Some(stored()))
            .await
            .expect_err("Missing response treated as success");
        assert_eq!(err.kind(), errors::ErrorKind::Request);
    }

    #[tokio::test]
    async fn owned_games_require_session() {
        let transport = Arc::new(ScriptedTransport::default());
        let host = Arc::new(RecordingHost::default());
        let plugin = plugin(&transport, &host);

        let err = plugin.get_owned_games().await.expect_err("No session");
        assert!(err.is_authentication_required());
        assert!(transport.requests().is_empty());
        assert_eq!(host.lost_count(), 0);
    }

    #[tokio::test]
    async fn logout_drops_session() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.respond("https://www.indiegala.com/", HOMEPAGE);
        let host = Arc::new(RecordingHost::default());
        let plugin = plugin(&transport, &host);

        plugin.authenticate(Some(stored())).await.unwrap();
        plugin.logout();
        plugin.ensure_auth().expect_err("Session survived logout");
    }
}
