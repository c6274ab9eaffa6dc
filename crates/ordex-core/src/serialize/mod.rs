mod cbor;

use crate::error::{EngineError, ErrorClass, ErrorOrigin};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error as ThisError;

/// Generic CBOR serialization infrastructure.
///
/// This module is format-level only:
/// - No engine-layer constants or policy limits are defined here.
/// - The row-envelope cap belongs to the store layer (`store::MAX_ROW_BYTES`).

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("serialize error: {0}")]
    Serialize(String),

    #[error("deserialize error: {0}")]
    Deserialize(String),

    #[error("deserialize size limit exceeded: {len} bytes (limit {max_bytes})")]
    DeserializeSizeLimitExceeded { len: usize, max_bytes: usize },
}

impl From<SerializeError> for EngineError {
    fn from(err: SerializeError) -> Self {
        // A row envelope that fails to decode is corrupt stored data.
        Self::new(ErrorClass::Storage, ErrorOrigin::Serialize, err.to_string())
    }
}

/// Serialize a value into the engine's CBOR envelope.
pub fn serialize<T>(ty: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    cbor::serialize(ty)
}

/// Deserialize a value produced by [`serialize`], bounded by the store's
/// row-envelope cap.
pub fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    cbor::deserialize(bytes)
}
