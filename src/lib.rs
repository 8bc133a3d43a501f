pub mod auth;
pub mod config;
pub mod constants;
mod core;
pub mod errors;
pub mod galaxy;
pub mod http;
pub mod library;
pub mod utils;

#[cfg(test)]
mod testing;

pub use crate::config::PluginConfig;
pub use crate::errors::Error;
pub use auth::types::Credentials;
pub use core::Plugin;
pub use galaxy::Host;
