use super::encryption::KdfParams;
use crate::errors::CoreError;

/// Magic bytes identifying an encrypted gold-portfolio snapshot.
pub const MAGIC: &[u8; 4] = b"GLDV";

/// Current container version.
pub const CURRENT_VERSION: u16 = 1;

/// Minimum container size in bytes:
/// magic(4) + version(2) + kdf_params(12) + salt(16) + nonce(12) + ciphertext_len(8) = 54
pub const MIN_HEADER_SIZE: usize = 54;

/// Header parsed from an encrypted snapshot container.
#[derive(Debug)]
pub struct ContainerHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; 16],
    pub nonce: [u8; 12],
    pub ciphertext_len: u64,
}

/// Assemble a complete encrypted container.
///
/// Layout:
/// ```text
/// [GLDV: 4B] [version: 2B LE] [memory_cost: 4B LE] [time_cost: 4B LE]
/// [parallelism: 4B LE] [salt: 16B] [nonce: 12B] [ciphertext_len: 8B LE]
/// [ciphertext: variable]
/// ```
pub fn write_container(
    version: u16,
    kdf_params: &KdfParams,
    salt: &[u8; 16],
    nonce: &[u8; 12],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MIN_HEADER_SIZE + ciphertext.len());

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&kdf_params.memory_cost.to_le_bytes());
    buf.extend_from_slice(&kdf_params.time_cost.to_le_bytes());
    buf.extend_from_slice(&kdf_params.parallelism.to_le_bytes());
    buf.extend_from_slice(salt);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(ciphertext);

    buf
}

/// Parse the header from raw container bytes.
/// Returns the header and the ciphertext slice.
pub fn read_container(data: &[u8]) -> Result<(ContainerHeader, &[u8]), CoreError> {
    if data.len() < MIN_HEADER_SIZE {
        return Err(CoreError::InvalidFormat(
            "Blob too small to be a valid snapshot container".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFormat(
            "Invalid magic bytes — not a gold snapshot container".into(),
        ));
    }

    let mut offset = 4;

    let version = u16::from_le_bytes([data[offset], data[offset + 1]]);
    offset += 2;

    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let mut read_u32 = |off: &mut usize| -> Result<u32, CoreError> {
        let bytes = data[*off..*off + 4]
            .try_into()
            .map_err(|_| CoreError::InvalidFormat("Failed to read KDF params".into()))?;
        *off += 4;
        Ok(u32::from_le_bytes(bytes))
    };

    let memory_cost = read_u32(&mut offset)?;
    let time_cost = read_u32(&mut offset)?;
    let parallelism = read_u32(&mut offset)?;

    // Reject out-of-range KDF params so a crafted blob cannot force a
    // resource-exhausting key derivation.
    if !(8..=1_048_576).contains(&memory_cost) {
        return Err(CoreError::InvalidFormat(format!(
            "KDF memory_cost out of safe range: {memory_cost} KiB (expected 8..1048576)"
        )));
    }
    if !(1..=20).contains(&time_cost) {
        return Err(CoreError::InvalidFormat(format!(
            "KDF time_cost out of safe range: {time_cost} (expected 1..20)"
        )));
    }
    if !(1..=16).contains(&parallelism) {
        return Err(CoreError::InvalidFormat(format!(
            "KDF parallelism out of safe range: {parallelism} (expected 1..16)"
        )));
    }

    let mut salt = [0u8; 16];
    salt.copy_from_slice(&data[offset..offset + 16]);
    offset += 16;

    let mut nonce = [0u8; 12];
    nonce.copy_from_slice(&data[offset..offset + 12]);
    offset += 12;

    let ciphertext_len = u64::from_le_bytes(
        data[offset..offset + 8]
            .try_into()
            .map_err(|_| CoreError::InvalidFormat("Failed to read ciphertext length".into()))?,
    );
    offset += 8;

    let expected_end = offset + ciphertext_len as usize;
    if data.len() < expected_end {
        return Err(CoreError::InvalidFormat(format!(
            "Blob truncated: expected {} bytes of ciphertext, got {}",
            ciphertext_len,
            data.len() - offset
        )));
    }

    let ciphertext = &data[offset..expected_end];

    let header = ContainerHeader {
        version,
        kdf_params: KdfParams {
            memory_cost,
            time_cost,
            parallelism,
        },
        salt,
        nonce,
        ciphertext_len,
    };

    Ok((header, ciphertext))
}
