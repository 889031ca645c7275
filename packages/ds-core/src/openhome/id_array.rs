//! Binary ID array decoding.
//!
//! `IdArray` replies carry the playlist or radio slot ids as a base64 blob of
//! 32-bit big-endian words. Slot `0` marks an empty slot and is dropped.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{DsError, DsResult};
use crate::protocol_constants::EMPTY_SLOT_ID;

/// Decodes a base64 id array into the ordered list of occupied slot ids.
///
/// Whitespace inside the blob (line-wrapped base64) is ignored, and an empty
/// blob means an empty list. Order is preserved; ids are not deduplicated.
///
/// # Errors
/// Returns `DsError::Decode` if the blob is not valid base64 or the decoded
/// length is not a whole number of 4-byte words.
pub fn decode_id_array(blob: &str) -> DsResult<Vec<u32>> {
    let compact: String = blob.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Ok(Vec::new());
    }

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| DsError::decode("IdArray", e, blob))?;

    if bytes.len() % 4 != 0 {
        return Err(DsError::decode(
            "IdArray",
            format!("payload length {} is not a multiple of 4", bytes.len()),
            blob,
        ));
    }

    let ids: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|word| u32::from_be_bytes([word[0], word[1], word[2], word[3]]))
        .filter(|&id| id != EMPTY_SLOT_ID)
        .collect();

    log::debug!(
        "[DS] Decoded IdArray: {} words, {} occupied slots",
        bytes.len() / 4,
        ids.len()
    );

    Ok(ids)
}
