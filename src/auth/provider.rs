use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OAuth strategies offered on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "oauth_google")]
    Google,
    #[serde(rename = "oauth_apple")]
    Apple,
}

impl Strategy {
    /// Wire name understood by the identity service.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "oauth_google",
            Self::Apple => "oauth_apple",
        }
    }

    /// Button label on the login screen.
    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Continue with Google",
            Self::Apple => "Continue with Apple",
        }
    }
}

/// Outcome of an OAuth flow. No session means the user backed out or the
/// provider needs further steps; it is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthFlow {
    #[serde(default)]
    pub created_session_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Identity service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid identity endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// External identity service. The application never authenticates users
/// itself; it only starts flows and activates the sessions they produce.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the OAuth flow for `strategy`.
    async fn start_auth_flow(&self, strategy: Strategy) -> Result<AuthFlow, AuthError>;

    /// Make `session_id` the active session.
    async fn set_active(&self, session_id: &str) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_wire_names() {
        assert_eq!(Strategy::Google.as_str(), "oauth_google");
        assert_eq!(Strategy::Apple.as_str(), "oauth_apple");
        assert_eq!(
            serde_json::to_string(&Strategy::Apple).unwrap(),
            "\"oauth_apple\""
        );
    }

    #[test]
    fn auth_flow_tolerates_missing_session() {
        let flow: AuthFlow = serde_json::from_str("{}").unwrap();
        assert_eq!(flow.created_session_id, None);

        let flow: AuthFlow =
            serde_json::from_str(r#"{"created_session_id": "sess_1"}"#).unwrap();
        assert_eq!(flow.created_session_id.as_deref(), Some("sess_1"));
    }
}
