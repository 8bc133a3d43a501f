// Contract with the Galaxy client hosting the plugin
pub mod types;

use crate::auth::types::Credentials;

/// Callbacks into the host process
///
/// The host owns the JSON-RPC transport and persistent credential storage,
/// the plugin only notifies it.
pub trait Host: Send + Sync {
    /// Persist credentials, they are handed back to `authenticate` on next launch
    fn store_credentials(&self, credentials: &Credentials);

    /// The site stopped accepting the stored session
    fn lost_authentication(&self);
}
