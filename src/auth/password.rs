//! Argon2id password hashing. The public functions are async and run the
//! hashing on tokio's blocking pool so request workers stay free.

use anyhow::Context;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tokio::task;

lazy_static! {
    // Verified against when the login email is unknown, so both failure paths run argon2.
    static ref DUMMY_HASH: Option<String> = argon2_hash("userauth-dummy-password").ok();
}

fn argon2_hash(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| anyhow::anyhow!("argon2 hash: {e}"))
}

fn argon2_matches(plain: &str, phc: &str) -> anyhow::Result<bool> {
    let stored = PasswordHash::new(phc).map_err(|e| anyhow::anyhow!("stored hash unreadable: {e}"))?;
    match Argon2::default().verify_password(plain.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("argon2 verify: {e}")),
    }
}

/// Salted one-way hash in PHC string form.
pub async fn hash_password(plain: String) -> anyhow::Result<String> {
    task::spawn_blocking(move || argon2_hash(&plain))
        .await
        .context("hashing task panicked")?
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub async fn verify_password(plain: String, phc: String) -> anyhow::Result<bool> {
    task::spawn_blocking(move || argon2_matches(&plain, &phc))
        .await
        .context("verify task panicked")?
}

/// Burns one verification for a login whose email has no account.
pub async fn verify_against_dummy(plain: String) {
    let _ = task::spawn_blocking(move || {
        if let Some(phc) = DUMMY_HASH.as_deref() {
            let _ = argon2_matches(&plain, phc);
        }
    })
    .await;
}
