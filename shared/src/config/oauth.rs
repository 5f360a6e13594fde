//! Google OAuth client configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Google OAuth2 client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Callback URL registered with Google
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scopes: Vec<String>,
}

impl Default for GoogleOAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_url: String::from("http://localhost:8080/api/auth/google/callback"),
            auth_url: String::from("https://accounts.google.com/o/oauth2/auth"),
            token_url: String::from("https://oauth2.googleapis.com/token"),
            userinfo_url: String::from("https://www.googleapis.com/oauth2/v2/userinfo"),
            scopes: vec![
                String::from("https://www.googleapis.com/auth/userinfo.email"),
                String::from("https://www.googleapis.com/auth/userinfo.profile"),
            ],
        }
    }
}

impl GoogleOAuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            client_id: env_or("GOOGLE_CLIENT_ID", ""),
            client_secret: env_or("GOOGLE_CLIENT_SECRET", ""),
            redirect_url: env_or("GOOGLE_REDIRECT_URL", &defaults.redirect_url),
            ..defaults
        }
    }
}
