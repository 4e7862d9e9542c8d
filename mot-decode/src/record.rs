use mot_core::DecodeOutcome;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for one received uplink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadingId(pub Ulid);

/// A decoded uplink as handed to the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UplinkRecord {
    /// Unique id for this uplink.
    pub id: ReadingId,
    /// When the payload was decoded.
    pub received_at: jiff::Timestamp,
    /// The raw payload, lowercase hex.
    pub payload_hex: String,
    /// Decoder result.
    pub outcome: DecodeOutcome,
}

impl UplinkRecord {
    pub fn new(payload: &[u8], outcome: DecodeOutcome) -> Self {
        Self {
            id: ReadingId(Ulid::new()),
            received_at: jiff::Timestamp::now(),
            payload_hex: hex::encode(payload),
            outcome,
        }
    }
}
