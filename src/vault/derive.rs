// Passbank — Database Key Derivation
//
// The SQLCipher key is stretched from the configured database password with
// Argon2id. The salt binds it to the username and database name, so any wrong
// credential produces a key that cannot open the file.

use argon2::{Algorithm, Argon2, Params, Version};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::VaultError;

/// Length of the derived database key in bytes (256-bit for AES-256).
const DERIVED_KEY_LEN: usize = 32;

// Argon2id parameters: m=65536 (64 MiB), t=3 (3 iterations), p=4 (4 lanes)
const ARGON2_M_COST: u32 = 65536;
const ARGON2_T_COST: u32 = 3;
const ARGON2_P_COST: u32 = 4;

/// Derive the database key from the connection credentials.
pub fn derive_db_key(
    username: &str,
    database: &str,
    password: &str,
) -> Result<Zeroizing<Vec<u8>>, VaultError> {
    let salt = build_salt(username, database);

    let params = Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, Some(DERIVED_KEY_LEN))
        .map_err(|e| VaultError::Derivation(format!("invalid Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut derived_key = Zeroizing::new(vec![0u8; DERIVED_KEY_LEN]);
    argon2
        .hash_password_into(password.as_bytes(), &salt, &mut derived_key)
        .map_err(|e| VaultError::Derivation(format!("Argon2id hash failed: {}", e)))?;

    Ok(derived_key)
}

/// Convert key bytes to the hex string format SQLCipher expects.
pub fn key_to_hex(key: &[u8]) -> Zeroizing<String> {
    Zeroizing::new(key.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Salt = SHA-256(username || "::" || database)
fn build_salt(username: &str, database: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b"::");
    hasher.update(database.as_bytes());
    hasher.finalize().to_vec()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let a = derive_db_key("alice", "passbank", "pw").unwrap();
        let b = derive_db_key("alice", "passbank", "pw").unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
        assert_eq!(a.len(), DERIVED_KEY_LEN);
    }

    #[test]
    fn test_any_credential_change_changes_key() {
        let base = derive_db_key("alice", "passbank", "pw").unwrap();
        let other_password = derive_db_key("alice", "passbank", "pw2").unwrap();
        let other_user = derive_db_key("bob", "passbank", "pw").unwrap();
        let other_db = derive_db_key("alice", "other", "pw").unwrap();

        assert_ne!(base.as_slice(), other_password.as_slice());
        assert_ne!(base.as_slice(), other_user.as_slice());
        assert_ne!(base.as_slice(), other_db.as_slice());
    }

    #[test]
    fn test_key_to_hex() {
        assert_eq!(key_to_hex(&[0x00, 0xab, 0xff]).as_str(), "00abff");
        assert_eq!(key_to_hex(&[0u8; DERIVED_KEY_LEN]).len(), 64);
    }
}
