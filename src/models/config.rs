//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HMAC secret used to sign access tokens.
    pub secret: String,
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_minutes: i64,
    /// Directory receiving uploaded vehicle pictures.
    pub upload_dir: String,
    /// Initial password of credentials provisioned for new customers and employees.
    pub default_password: String,
}

fn default_token_lifetime() -> i64 {
    60
}
