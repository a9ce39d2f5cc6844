//! Username resolution shared by services that accept usernames.

use crate::identity::domain::{UserId, Username};
use crate::identity::ports::UserRepository;
use crate::persistence::RepositoryError;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors returned while resolving usernames.
#[derive(Debug, Clone, Error)]
pub enum UserLookupError {
    /// No account has the given username.
    #[error("unknown user: {0}")]
    UnknownUser(String),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Resolves every username to its account identifier.
///
/// Blank entries are skipped and duplicates collapse.
///
/// # Errors
///
/// Returns [`UserLookupError::UnknownUser`] for the first name with no
/// matching account.
pub async fn resolve_usernames<R>(
    repository: &R,
    usernames: &[String],
) -> Result<BTreeSet<UserId>, UserLookupError>
where
    R: UserRepository + ?Sized,
{
    let mut resolved = BTreeSet::new();
    for raw in usernames.iter().filter(|name| !name.trim().is_empty()) {
        let username =
            Username::new(raw.as_str()).map_err(|_| UserLookupError::UnknownUser(raw.clone()))?;
        let user = repository
            .find_user_by_username(&username)
            .await?
            .ok_or_else(|| UserLookupError::UnknownUser(raw.clone()))?;
        resolved.insert(user.id());
    }
    Ok(resolved)
}
