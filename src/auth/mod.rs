//! Identity: the external provider interface, its HTTP adapter, and the
//! in-memory session.

mod http;
mod provider;
mod session;

pub use http::HttpIdentityProvider;
pub use provider::{AuthError, AuthFlow, IdentityProvider, Strategy};
pub use session::Session;

/// Run `strategy`'s flow and activate the session it creates.
///
/// Returns the activated session id, or `None` when the flow finished
/// without creating a session.
pub async fn sign_in(
    provider: &dyn IdentityProvider,
    strategy: Strategy,
) -> Result<Option<String>, AuthError> {
    let flow = provider.start_auth_flow(strategy).await?;
    let Some(session_id) = flow.created_session_id else {
        tracing::info!(strategy = strategy.as_str(), "OAuth flow ended without a session");
        return Ok(None);
    };

    provider.set_active(&session_id).await?;
    tracing::info!(strategy = strategy.as_str(), "Signed in");
    Ok(Some(session_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeProvider {
        session: Option<&'static str>,
        fail_start: bool,
        activated: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn new(session: Option<&'static str>) -> Self {
            Self {
                session,
                fail_start: false,
                activated: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        async fn start_auth_flow(&self, _strategy: Strategy) -> Result<AuthFlow, AuthError> {
            if self.fail_start {
                return Err(AuthError::Rejected {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(AuthFlow {
                created_session_id: self.session.map(str::to_string),
            })
        }

        async fn set_active(&self, session_id: &str) -> Result<(), AuthError> {
            self.activated.lock().unwrap().push(session_id.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn created_session_is_activated() {
        let provider = FakeProvider::new(Some("sess_1"));
        let result = sign_in(&provider, Strategy::Google).await.unwrap();
        assert_eq!(result.as_deref(), Some("sess_1"));
        assert_eq!(*provider.activated.lock().unwrap(), vec!["sess_1"]);
    }

    #[tokio::test]
    async fn no_session_activates_nothing() {
        let provider = FakeProvider::new(None);
        let result = sign_in(&provider, Strategy::Apple).await.unwrap();
        assert!(result.is_none());
        assert!(provider.activated.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let mut provider = FakeProvider::new(Some("sess_1"));
        provider.fail_start = true;
        let result = sign_in(&provider, Strategy::Google).await;
        assert!(matches!(result, Err(AuthError::Rejected { status: 503, .. })));
        assert!(provider.activated.lock().unwrap().is_empty());
    }
}
