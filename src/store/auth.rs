//! Fixed-secret authorizer for local and demo deployments.

use async_trait::async_trait;

use crate::error::LedgerResult;

use super::Authorizer;

/// Accepts exactly one configured secret.
#[derive(Debug, Clone)]
pub struct FixedSecretAuthorizer {
    secret: String,
}

impl FixedSecretAuthorizer {
    /// Creates an authorizer for the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl Authorizer for FixedSecretAuthorizer {
    async fn verify(&self, secret: &str) -> LedgerResult<bool> {
        Ok(!self.secret.is_empty() && secret == self.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_accepts_only_configured_secret() {
        let authorizer = FixedSecretAuthorizer::new("admin888");
        assert!(authorizer.verify("admin888").await.unwrap());
        assert!(!authorizer.verify("admin889").await.unwrap());
        assert!(!authorizer.verify("").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_secret_accepts_nothing() {
        let authorizer = FixedSecretAuthorizer::new("");
        assert!(!authorizer.verify("").await.unwrap());
    }
}
