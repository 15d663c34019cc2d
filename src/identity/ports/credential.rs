//! Credential resolution port.

use crate::identity::domain::{Identity, IdentityError};
use async_trait::async_trait;

/// Result type for identity resolution.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Turns an inbound credential into a resolved identity.
///
/// Token issuance and session management live outside the core; this port is
/// the only seam the core sees.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Resolves an opaque credential into an identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthorized`] when the credential maps to
    /// no valid identity.
    async fn resolve(&self, credential: &str) -> IdentityResult<Identity>;
}
