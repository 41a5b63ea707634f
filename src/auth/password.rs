//! Password Encoding
//! Mission: Match raw passwords against encoder-prefixed stored values
//!
//! Stored passwords carry the id of the encoder that produced them:
//! `{noop}secret` is compared verbatim, `{bcrypt}$2b$12$...` is checked with
//! bcrypt. Values without a prefix are treated as plain text.

use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::warn;

const NOOP_ID: &str = "noop";
const BCRYPT_ID: &str = "bcrypt";

/// Split `{id}rest` into `(Some(id), rest)`
fn split_encoder_id(stored: &str) -> (Option<&str>, &str) {
    if let Some(rest) = stored.strip_prefix('{') {
        if let Some(end) = rest.find('}') {
            return (Some(&rest[..end]), &rest[end + 1..]);
        }
    }
    (None, stored)
}

/// Check a raw password against its stored representation
pub fn matches(raw: &str, stored: &str) -> bool {
    match split_encoder_id(stored) {
        (None, plain) | (Some(NOOP_ID), plain) => raw == plain,
        (Some(BCRYPT_ID), hashed) => match verify(raw, hashed) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Stored bcrypt hash could not be verified: {}", e);
                false
            }
        },
        (Some(other), _) => {
            warn!("Unknown password encoder id: {{{}}}", other);
            false
        }
    }
}

/// Encode a raw password as `{bcrypt}<hash>`
pub fn encode_bcrypt(raw: &str) -> Result<String> {
    let hashed = hash(raw, DEFAULT_COST).context("Failed to hash password")?;
    Ok(format!("{{{}}}{}", BCRYPT_ID, hashed))
}

/// Encode a raw password as `{noop}<raw>` (no hashing)
pub fn encode_noop(raw: &str) -> String {
    format!("{{{}}}{}", NOOP_ID, raw)
}
