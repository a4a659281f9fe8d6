use super::save::SaveInfo;
use crate::error::SaveFormatError;

/// Magic bytes identifying a project save file.
const MAGIC: [u8; 4] = *b"SSEI";
/// Current save format version. Bump when the field layout of the save
/// records changes; field order is significant in the encoded body.
const FORMAT_VERSION: u16 = 2;

/// Encodes a project as a versioned binary save: magic, format version, then
/// the save records as a sequential length-prefixed-collection payload.
pub fn encode_save(save: &SaveInfo) -> Result<Vec<u8>, SaveFormatError> {
    let body = bincode::serde::encode_to_vec(save, bincode::config::standard())
        .map_err(|e| SaveFormatError::Corrupt(e.to_string()))?;

    let mut out = Vec::with_capacity(MAGIC.len() + 2 + body.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decodes a versioned binary save produced by [`encode_save`].
pub fn decode_save(bytes: &[u8]) -> Result<SaveInfo, SaveFormatError> {
    if bytes.len() < MAGIC.len() + 2 || bytes[..MAGIC.len()] != MAGIC {
        return Err(SaveFormatError::BadMagic);
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FORMAT_VERSION {
        return Err(SaveFormatError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }

    let (save, _len) =
        bincode::serde::decode_from_slice(&bytes[MAGIC.len() + 2..], bincode::config::standard())
            .map_err(|e| SaveFormatError::Corrupt(e.to_string()))?;
    Ok(save)
}
