// ---------------------------------------------------------------------------
// file_header – Cache file header with magic bytes, version, key, checksum
// ---------------------------------------------------------------------------
//
// Header format (20 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "GMAP" (0x474D4150)
//   [4..8]   Format version (u32)
//   [8..12]  Configuration key (u32: xxHash32 of plan dims + sensor layout)
//   [12..16] Uncompressed payload size (u32)
//   [16..20] xxHash32 checksum of the payload (everything after the header)
//
// On store: encode + compress the region map -> prepend header
// On load: check magic -> reject newer versions -> verify checksum -> strip

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

/// Magic bytes identifying a region-map cache file.
pub const MAGIC: [u8; 4] = [0x47, 0x4D, 0x41, 0x50]; // "GMAP"

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Current header layout version, distinct from the payload schema version
/// (which tracks the encoded region-map shape).
pub const HEADER_FORMAT_VERSION: u32 = 1;

/// Seed for xxHash32 checksums.
const XXHASH_SEED: u32 = 0;

/// Parsed cache file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub config_key: u32,
    pub uncompressed_size: u32,
    pub checksum: u32,
}

/// Wrap a payload with a cache header.
///
/// `uncompressed_size` is the payload length before compression, recorded so
/// the load path can sanity-check the decompressed bytes.
pub fn wrap_with_header(payload: &[u8], config_key: u32, uncompressed_size: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&HEADER_FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&config_key.to_le_bytes());
    out.extend_from_slice(&uncompressed_size.to_le_bytes());
    out.extend_from_slice(&xxh32(payload, XXHASH_SEED).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Parse and validate the header, returning it with the payload slice.
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Corrupted(format!(
            "file is {} bytes, need at least {HEADER_SIZE} for the header",
            bytes.len()
        )));
    }
    if bytes[..4] != MAGIC {
        return Err(SaveError::Corrupted(
            "missing GMAP magic bytes".to_string(),
        ));
    }

    let format_version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let config_key = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    let uncompressed_size = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
    let checksum = u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);

    if format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: HEADER_FORMAT_VERSION,
            found: format_version,
        });
    }

    let payload = &bytes[HEADER_SIZE..];
    let computed = xxh32(payload, XXHASH_SEED);
    if computed != checksum {
        return Err(SaveError::Corrupted(format!(
            "checksum mismatch (expected {checksum:#010x}, got {computed:#010x})"
        )));
    }

    Ok((
        FileHeader {
            format_version,
            config_key,
            uncompressed_size,
            checksum,
        },
        payload,
    ))
}
