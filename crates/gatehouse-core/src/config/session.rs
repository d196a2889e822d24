//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Session resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether cookie values are signed as `<token>.<signature>`.
    ///
    /// The issuing auth service signs and checks the cookie; this service
    /// only strips the signature to find the store key. Turn this off when
    /// tokens are issued unsigned and may themselves contain dots.
    #[serde(default = "default_signed_cookies")]
    pub signed_cookies: bool,
    /// Where unauthenticated callers are sent to sign in.
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
    /// Header that overrides the session's active organization.
    #[serde(default = "default_organization_header")]
    pub organization_header: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            signed_cookies: default_signed_cookies(),
            sign_in_path: default_sign_in_path(),
            organization_header: default_organization_header(),
        }
    }
}

fn default_cookie_name() -> String {
    "gatehouse.session_token".to_string()
}

fn default_signed_cookies() -> bool {
    true
}

fn default_sign_in_path() -> String {
    "/login".to_string()
}

fn default_organization_header() -> String {
    "x-organization-id".to_string()
}
