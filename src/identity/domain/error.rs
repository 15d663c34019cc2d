//! Error types for identity resolution and role parsing.

use std::sync::Arc;
use thiserror::Error;

/// Errors returned while resolving a credential to an identity.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The presented credential maps to no valid identity.
    #[error("no valid identity for the presented credential")]
    Unauthorized,

    /// Resolver-backend failure.
    #[error("identity resolver error: {0}")]
    Resolver(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a resolver-backend error.
    pub fn resolver(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Resolver(Arc::new(err))
    }

    /// Returns the machine-readable error kind for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Resolver(_) => "internal",
        }
    }
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
