//! ID generation for tkt entities
//!
//! Hash-token IDs, one namespace per entity type.
//! Format: tkt-xxxxxxxx / rpl-xxxxxxxx (8 lowercase alphanumeric chars).

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate an entity ID
///
/// Uses UUID + timestamp hash, encoded as base32 lowercase.
/// Collision-resistant but not collision-proof: the store re-rolls
/// under its write lock if a generated ID is already taken, so global
/// uniqueness is enforced at insertion, not here.
pub fn generate_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4();
    let timestamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);

    let mut hasher = Sha256::new();
    hasher.update(uuid.as_bytes());
    hasher.update(timestamp.to_le_bytes());

    let hash = hasher.finalize();

    // Take first 5 bytes, encode as base32 lowercase, take first 8 chars
    let encoded = base32::encode(base32::Alphabet::Crockford, &hash[..5])
        .to_lowercase()
        .chars()
        .take(8)
        .collect::<String>();

    format!("{}-{}", prefix, encoded)
}

/// Parse an entity ID to extract prefix and token
pub fn parse_id(id: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = id.splitn(2, '-').collect();
    if parts.len() == 2 {
        Some((parts[0], parts[1]))
    } else {
        None
    }
}
