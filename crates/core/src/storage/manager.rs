use crate::errors::CoreError;
use crate::models::snapshot::GoldData;

use super::encryption::{self, KdfParams};
use super::format;

/// High-level sealing of snapshots into portable encrypted blobs.
pub struct StorageManager;

impl StorageManager {
    /// Serialize and encrypt a snapshot.
    ///
    /// Flow: GoldData → bincode → AES-256-GCM(Argon2id(passphrase)) → GLDV container
    pub fn seal(snapshot: &GoldData, passphrase: &str) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))?;

        let salt = encryption::generate_salt()?;
        let nonce = encryption::generate_nonce()?;

        let kdf_params = KdfParams::default();
        let key = encryption::derive_key(passphrase, &salt, &kdf_params)?;

        let ciphertext = encryption::encrypt(&plaintext, &key, &nonce)?;

        Ok(format::write_container(
            format::CURRENT_VERSION,
            &kdf_params,
            &salt,
            &nonce,
            &ciphertext,
        ))
    }

    /// Decrypt and deserialize a snapshot.
    ///
    /// Flow: GLDV container → parse header → Argon2id(passphrase, salt) →
    /// AES-256-GCM decrypt → bincode → GoldData
    pub fn open(data: &[u8], passphrase: &str) -> Result<GoldData, CoreError> {
        let (header, ciphertext) = format::read_container(data)?;

        let key = encryption::derive_key(passphrase, &header.salt, &header.kdf_params)?;

        let plaintext = encryption::decrypt(ciphertext, &key, &header.nonce)?;

        bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize snapshot: {e}")))
    }
}
