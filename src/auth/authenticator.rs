//! Credential Verification
//! Mission: Decide whether a login request matches a stored account

use crate::auth::{
    models::{AuthFailure, CredentialRecord, LoginRequest},
    password,
    user_store::UserStore,
};

/// Verify a login request against the store.
///
/// Unknown user and wrong password are reported separately here so they can
/// be logged; callers must not expose the difference to clients.
pub fn authenticate<'a>(
    store: &'a UserStore,
    request: &LoginRequest,
) -> Result<&'a CredentialRecord, AuthFailure> {
    let record = store
        .find_by_username(&request.username)
        .ok_or(AuthFailure::UserNotFound)?;

    if !password::matches(&request.password, &record.password) {
        return Err(AuthFailure::PasswordMismatch);
    }

    Ok(record)
}
