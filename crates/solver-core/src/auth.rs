//! Identity providers.
//!
//! The core only needs an opaque, non-empty user id. Providers turn
//! whatever the user did (typed an Agent ID, completed a federated sign-in)
//! into that id, or into an [`AuthError`] with remediation text.

use crate::error::AuthError;
use crate::session::IdentitySource;

/// Every identity provider implements this trait.
pub trait IdentityProvider {
    /// Shown in "Authenticated with ..." notifications.
    fn display_name(&self) -> &str;

    fn source(&self) -> IdentitySource;

    /// Produce the user id for the new session.
    fn sign_in(&mut self) -> Result<String, AuthError>;
}

/// Free-text agent identifier, e.g. `Solver001`.
pub struct AgentIdProvider {
    agent_id: String,
}

impl AgentIdProvider {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
        }
    }
}

impl IdentityProvider for AgentIdProvider {
    fn display_name(&self) -> &str {
        "Agent ID"
    }

    fn source(&self) -> IdentitySource {
        IdentitySource::Agent
    }

    fn sign_in(&mut self) -> Result<String, AuthError> {
        let id = self.agent_id.trim();
        if id.is_empty() {
            return Err(AuthError::EmptyIdentity);
        }
        Ok(id.to_string())
    }
}

/// Settings a federated provider needs before it can be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FederatedConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
}

impl FederatedConfig {
    /// # Errors
    ///
    /// [`AuthError::ProviderNotConfigured`] naming the first missing field.
    pub fn validate(&self) -> Result<(), AuthError> {
        let fields = [
            ("api_key", &self.api_key),
            ("auth_domain", &self.auth_domain),
            ("project_id", &self.project_id),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(AuthError::ProviderNotConfigured(format!("{name} is missing"))),
            None => Ok(()),
        }
    }
}

/// Wraps the outcome of a federated sign-in performed by the front end.
/// `Err` holds the provider's error code and message.
pub struct FederatedSignIn {
    config: FederatedConfig,
    outcome: Option<Result<String, (String, String)>>,
}

impl FederatedSignIn {
    pub fn new(config: FederatedConfig, outcome: Result<String, (String, String)>) -> Self {
        Self {
            config,
            outcome: Some(outcome),
        }
    }
}

impl IdentityProvider for FederatedSignIn {
    fn display_name(&self) -> &str {
        "Google"
    }

    fn source(&self) -> IdentitySource {
        IdentitySource::Federated
    }

    fn sign_in(&mut self) -> Result<String, AuthError> {
        self.config.validate()?;
        match self.outcome.take() {
            Some(Ok(email)) if !email.trim().is_empty() => Ok(email.trim().to_string()),
            Some(Ok(_)) => Err(AuthError::EmptyIdentity),
            Some(Err((code, message))) => Err(AuthError::from_provider_code(&code, &message)),
            None => Err(AuthError::Rejected("sign-in already consumed".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> FederatedConfig {
        FederatedConfig {
            api_key: "key".into(),
            auth_domain: "solver.firebaseapp.com".into(),
            project_id: "solver".into(),
        }
    }

    #[test]
    fn agent_id_is_trimmed() {
        let mut provider = AgentIdProvider::new("  Solver001 ");
        assert_eq!(provider.sign_in().unwrap(), "Solver001");
        assert_eq!(provider.source(), IdentitySource::Agent);
    }

    #[test]
    fn blank_agent_id_rejected() {
        assert_eq!(
            AgentIdProvider::new("   ").sign_in(),
            Err(AuthError::EmptyIdentity)
        );
    }

    #[test]
    fn federated_requires_config() {
        let mut config = configured();
        config.project_id.clear();
        let mut provider = FederatedSignIn::new(config, Ok("a@b.c".into()));
        let err = provider.sign_in().unwrap_err();
        assert!(matches!(err, AuthError::ProviderNotConfigured(_)));
        assert_eq!(err.user_message(), "Invalid Configuration Details");
    }

    #[test]
    fn federated_success_yields_email() {
        let mut provider = FederatedSignIn::new(configured(), Ok("agent@solver.dev".into()));
        assert_eq!(provider.sign_in().unwrap(), "agent@solver.dev");
        assert!(provider.sign_in().is_err());
    }

    #[test]
    fn federated_provider_codes_are_mapped() {
        let mut provider = FederatedSignIn::new(
            configured(),
            Err(("auth/operation-not-allowed".into(), "disabled".into())),
        );
        assert!(matches!(
            provider.sign_in(),
            Err(AuthError::ProviderDisabled { .. })
        ));
    }
}
