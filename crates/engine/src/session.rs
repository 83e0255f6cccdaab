//! Dashboard access gate.
//!
//! Credentials are never embedded: a [`CredentialVerifier`] decides whether a
//! username/secret pair is valid, and [`SessionGate`] keeps a durable
//! "logged in" flag on disk so the decision survives restarts.

use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::ResultEngine;

const SESSION_FLAG: &str = "authenticated=true";

/// Checks a username/secret pair.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, secret: &str) -> bool;
}

/// A single account whose password is known only by its SHA-256 digest.
#[derive(Clone, Debug)]
pub struct Sha256Credential {
    username: String,
    password_sha256: String,
}

impl Sha256Credential {
    /// `password_sha256` is the lowercase hex digest, as printed by
    /// [`Sha256Credential::digest`].
    pub fn new(username: impl Into<String>, password_sha256: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_sha256: password_sha256.into().trim().to_ascii_lowercase(),
        }
    }

    /// Lowercase hex SHA-256 of `secret`.
    pub fn digest(secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Byte comparison whose duration does not depend on where inputs differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl CredentialVerifier for Sha256Credential {
    fn verify(&self, username: &str, secret: &str) -> bool {
        if username.is_empty() || secret.is_empty() {
            return false;
        }
        let digest = Self::digest(secret);
        let user_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let secret_ok = constant_time_eq(digest.as_bytes(), self.password_sha256.as_bytes());
        user_ok && secret_ok
    }
}

/// Login state persisted in a flag file.
pub struct SessionGate<V> {
    verifier: V,
    flag_path: PathBuf,
}

impl<V: CredentialVerifier> SessionGate<V> {
    pub fn new(verifier: V, flag_path: impl Into<PathBuf>) -> Self {
        Self {
            verifier,
            flag_path: flag_path.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        std::fs::read_to_string(&self.flag_path)
            .map(|content| content.trim() == SESSION_FLAG)
            .unwrap_or(false)
    }

    /// Verify the credentials and, on success, persist the flag.
    ///
    /// Wrong credentials return `Ok(false)` and leave any existing flag alone.
    pub fn authenticate(&self, username: &str, secret: &str) -> ResultEngine<bool> {
        if !self.verifier.verify(username, secret) {
            return Ok(false);
        }
        std::fs::write(&self.flag_path, SESSION_FLAG)?;
        Ok(true)
    }

    pub fn logout(&self) -> ResultEngine<()> {
        match std::fs::remove_file(&self.flag_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Sha256Credential {
        Sha256Credential::new("admin", Sha256Credential::digest("correct horse"))
    }

    fn flag_path() -> PathBuf {
        std::env::temp_dir().join(format!("ledgerdash_session_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(
            Sha256Credential::digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn verifier_checks_user_and_secret() {
        let credential = credential();
        assert!(credential.verify("admin", "correct horse"));
        assert!(!credential.verify("admin", "wrong"));
        assert!(!credential.verify("root", "correct horse"));
        assert!(!credential.verify("admin", ""));
    }

    #[test]
    fn uppercase_digest_in_config_is_accepted() {
        let upper = Sha256Credential::digest("pw").to_uppercase();
        assert!(Sha256Credential::new("u", upper).verify("u", "pw"));
    }

    #[test]
    fn gate_persists_flag_until_logout() {
        let path = flag_path();
        let gate = SessionGate::new(credential(), &path);
        assert!(!gate.is_authenticated());

        assert!(!gate.authenticate("admin", "nope").unwrap());
        assert!(!gate.is_authenticated());

        assert!(gate.authenticate("admin", "correct horse").unwrap());
        let reopened = SessionGate::new(credential(), &path);
        assert!(reopened.is_authenticated());

        reopened.logout().unwrap();
        assert!(!gate.is_authenticated());
        gate.logout().unwrap();
    }
}
