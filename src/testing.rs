// Fakes for the network and the host
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use url::Url;

use crate::auth::types::Credentials;
use crate::errors::request_error;
use crate::galaxy::Host;
use crate::http::Transport;
use crate::Error;

/// Serves canned bodies by url and records every request made
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<String>>,
    cookies: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn respond(&self, url: &str, body: &str) {
        self.responses
            .lock()
            .insert(url.to_string(), body.to_string());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Cookie header sent with each request
    pub fn cookies(&self) -> Vec<String> {
        self.cookies.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: Url, credentials: &Credentials) -> Result<String, Error> {
        self.requests.lock().push(url.to_string());
        self.cookies.lock().push(credentials.cookie_header());
        self.responses
            .lock()
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| request_error(format!("no response scripted for {}", url)))
    }
}

#[derive(Default)]
pub struct RecordingHost {
    stored: Mutex<Vec<Credentials>>,
    lost: AtomicUsize,
}

impl RecordingHost {
    pub fn stored(&self) -> Vec<Credentials> {
        self.stored.lock().clone()
    }

    pub fn lost_count(&self) -> usize {
        self.lost.load(Ordering::SeqCst)
    }
}

impl Host for RecordingHost {
    fn store_credentials(&self, credentials: &Credentials) {
        self.stored.lock().push(credentials.clone());
    }

    fn lost_authentication(&self) {
        self.lost.fetch_add(1, Ordering::SeqCst);
    }
}
