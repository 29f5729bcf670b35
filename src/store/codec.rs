//! Slot payload encoding: the whole collection as one JSON array.

use crate::error::StorageError;
use crate::model::LandingPageRecord;
use im::Vector;

pub(crate) fn encode(
    slot: &str,
    pages: &Vector<LandingPageRecord>,
) -> Result<String, StorageError> {
    let records: Vec<&LandingPageRecord> = pages.iter().collect();
    serde_json::to_string(&records).map_err(|source| StorageError::Encode {
        slot: slot.to_string(),
        source,
    })
}

/// A blank payload decodes as an empty collection.
pub(crate) fn decode(slot: &str, payload: &str) -> Result<Vector<LandingPageRecord>, StorageError> {
    if payload.trim().is_empty() {
        return Ok(Vector::new());
    }
    let records: Vec<LandingPageRecord> =
        serde_json::from_str(payload).map_err(|source| StorageError::Decode {
            slot: slot.to_string(),
            source,
        })?;
    Ok(records.into_iter().collect())
}
