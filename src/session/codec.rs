//! Serialization of session records for key-value backends.
//!
//! Records are stored as compact JSON:
//! `{"userId":"u1","role":"user","createdAt":1000,"expiresAt":1700}`.
//! Anything that does not decode into a well-formed record is treated as
//! absent by callers.

use super::SessionRecord;

/// Encode a record for storage.
pub fn encode(record: &SessionRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}

/// Decode a stored value. Returns `None` for malformed or inconsistent data.
pub fn decode(raw: &str) -> Option<SessionRecord> {
    let record: SessionRecord = match serde_json::from_str(raw) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Discarding malformed session record: {}", e);
            return None;
        }
    };

    if record.user_id.is_empty() || record.expires_at < record.created_at {
        tracing::debug!("Discarding inconsistent session record");
        return None;
    }

    Some(record)
}
