use thiserror::Error;

/// Unified error type for the entire gold-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / Container ─────────────────────────────────────────
    #[error("Invalid container format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong passphrase or corrupted snapshot")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Remote store ────────────────────────────────────────────────
    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("Remote read failed (HTTP {status}): {message}")]
    RemoteRead { status: u16, message: String },

    #[error("Remote write failed (HTTP {status}): {message}")]
    RemoteWrite { status: u16, message: String },

    // ── Price extraction / Network ──────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("No gold price found on the source page")]
    PriceNotFound,

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Entry not found: {0}")]
    EntryNotFound(String),
}

impl CoreError {
    /// Shorthand for a per-field validation error.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so a
        // bearer credential can never leak into logs through an error string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}

impl From<base64::DecodeError> for CoreError {
    fn from(e: base64::DecodeError) -> Self {
        CoreError::InvalidFormat(format!("remote payload is not valid base64: {e}"))
    }
}
