use anyhow::anyhow;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{AppResult, Config};

pub(crate) fn hash_password(config: &Config, password: &str) -> AppResult<String> {
    let params = Params::new(
        config.hash_memory_kib,
        config.hash_iterations,
        Params::DEFAULT_P_COST,
        None,
    )
    .map_err(|e| anyhow!("Invalid argon2 parameters: {e}"))?;
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Password hashing failed: {e}"))?
        .to_string())
}

/// Cost parameters come from the stored hash, not the current config.
pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("Invalid password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
