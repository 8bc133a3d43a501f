use std::fmt::{Display, Formatter};

use crate::constants::markers;
use crate::errors::{authentication_required_error, EmptyResult};

/// Why the site refused to serve real content
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    AntiBotChallenge,
    ProfileLocked,
    Other(String),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AntiBotChallenge => f.write_str("anti-bot challenge"),
            Self::ProfileLocked => f.write_str("profile locked"),
            Self::Other(reason) => f.write_str(reason),
        }
    }
}

/// Predicate over a raw response body
pub trait RejectionCheck: Send + Sync {
    fn check(&self, body: &str) -> Option<Rejection>;
}

/// Substring match against a known page fragment
pub struct MarkerCheck {
    marker: String,
    rejection: Rejection,
}

impl MarkerCheck {
    pub fn new(marker: impl Into<String>, rejection: Rejection) -> Self {
        Self {
            marker: marker.into(),
            rejection,
        }
    }
}

impl RejectionCheck for MarkerCheck {
    fn check(&self, body: &str) -> Option<Rejection> {
        body.contains(&self.marker).then(|| self.rejection.clone())
    }
}

/// Set of checks run on every authenticated response before it is parsed
pub struct RejectionDetector {
    checks: Vec<Box<dyn RejectionCheck>>,
}

impl Default for RejectionDetector {
    fn default() -> Self {
        Self::empty()
            .with_check(MarkerCheck::new(
                markers::ANTI_BOT_CHALLENGE,
                Rejection::AntiBotChallenge,
            ))
            .with_check(MarkerCheck::new(
                markers::PROFILE_LOCKED,
                Rejection::ProfileLocked,
            ))
    }
}

impl RejectionDetector {
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn with_check<C>(mut self, check: C) -> Self
    where
        C: RejectionCheck + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    pub fn detect(&self, body: &str) -> Option<Rejection> {
        self.checks.iter().find_map(|check| check.check(body))
    }

    /// Fails with `AuthenticationRequired` when any check matches
    pub(crate) fn ensure_accepted(&self, body: &str) -> EmptyResult {
        match self.detect(body) {
            Some(rejection) => {
                log::warn!("Session rejected by the site: {}", rejection);
                Err(authentication_required_error())
            }
            None => Ok(()),
        }
    }
}
