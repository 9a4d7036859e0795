/// Salted password hashing for the local credential record
///
/// Credentials are not security-critical here (single local user, no
/// server), but the hash is salted so equal passwords never share a
/// stored value. Storage format is `<salt>$<sha256 hex digest>` where
/// the digest covers salt + password.

use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_BYTES: usize = 16;

pub(crate) struct PasswordHash {
    salt: String,
    digest: String,
}

impl PasswordHash {
    /// Hash a password with a fresh random salt
    pub fn create(plain: &str) -> Self {
        let mut rng = rand::thread_rng();
        let salt: String = (0..SALT_BYTES)
            .map(|_| format!("{:02x}", rng.gen::<u8>()))
            .collect();

        let digest = Self::digest_hex(&salt, plain);
        Self { salt, digest }
    }

    /// Parse the stored `salt$digest` form
    pub fn parse(stored: &str) -> Option<Self> {
        let (salt, digest) = stored.split_once('$')?;
        if salt.is_empty() || digest.is_empty() {
            return None;
        }
        Some(Self {
            salt: salt.to_string(),
            digest: digest.to_string(),
        })
    }

    /// Check a password attempt against this hash
    pub fn verify(&self, plain: &str) -> bool {
        Self::digest_hex(&self.salt, plain) == self.digest
    }

    /// The `salt$digest` form written to storage
    pub fn to_storage(&self) -> String {
        format!("{}${}", self.salt, self.digest)
    }

    fn digest_hex(salt: &str, plain: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(plain.as_bytes());
        let digest = hasher.finalize();

        let mut output = String::with_capacity(64);
        for byte in digest {
            use std::fmt::Write as _;
            let _ = write!(&mut output, "{byte:02x}");
        }
        output
    }
}
