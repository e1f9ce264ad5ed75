//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SECRETS_URL` (required): base URL of the secret store
/// - `API_KEY_SECRET_NAME` (optional): identifier of the secret holding the
///   shared API key. Deliberately not required at startup; when unset, every
///   authenticated request is denied instead of the process refusing to boot.
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `IMAGES_DIR` (optional): directory for uploaded ad images, defaults to `./data/images`
/// - `PUBLIC_BASE_URL` (optional): external base URL used to build image links,
///   defaults to `http://localhost:3000`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub secrets_url: String,

    pub api_key_secret_name: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_images_dir")]
    pub images_dir: String,

    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_images_dir() -> String {
    "./data/images".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }
}
