//! In-memory credential resolver for tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{Identity, IdentityError},
    ports::{CredentialResolver, IdentityResult},
};

/// Thread-safe token-to-identity map.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: Arc<RwLock<HashMap<String, Identity>>>,
}

impl StaticTokenResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for an identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Resolver`] when the backing map is poisoned.
    pub fn register(&self, token: impl Into<String>, identity: Identity) -> IdentityResult<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|err| IdentityError::resolver(std::io::Error::other(err.to_string())))?;
        tokens.insert(token.into(), identity);
        Ok(())
    }
}

#[async_trait]
impl CredentialResolver for StaticTokenResolver {
    async fn resolve(&self, credential: &str) -> IdentityResult<Identity> {
        let tokens = self
            .tokens
            .read()
            .map_err(|err| IdentityError::resolver(std::io::Error::other(err.to_string())))?;
        tokens
            .get(credential)
            .copied()
            .ok_or(IdentityError::Unauthorized)
    }
}
