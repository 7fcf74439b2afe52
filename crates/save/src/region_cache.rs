// ---------------------------------------------------------------------------
// region_cache – persisted region assignments keyed by scenario layout
// ---------------------------------------------------------------------------
//
// Region growth is the most expensive step of the pipeline and its result
// only depends on the floorplan and the sensor layout, never on readings.
// Caching it as a versioned owner array lets a restarted scenario skip
// straight to field seeding. The cache key is an xxHash32 over the plan
// dimensions and the sensor (id, x, y) triples; any layout change produces
// a different key and the stale cache is rejected on load.

use std::path::Path;

use bitcode::{Decode, Encode};
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use xxhash_rust::xxh32::xxh32;

use simulation::floorplan::Floorplan;
use simulation::regions::RegionMap;
use simulation::sensors::SensorRegistry;

use crate::file_header::{unwrap_header, wrap_with_header};
use crate::save_error::SaveError;

/// Schema version of the encoded payload. Bump when `CachedRegions` changes
/// shape; older builds reject newer payloads instead of misreading them.
pub const CACHE_SCHEMA_VERSION: u32 = 1;

/// Seed for the configuration key hash.
const CONFIG_KEY_SEED: u32 = 0x6D61_7030; // "map0"

#[derive(Encode, Decode, Debug, PartialEq)]
struct CachedRegions {
    schema_version: u32,
    width: u32,
    height: u32,
    owners: Vec<Option<u32>>,
}

/// Hash the layout a region map depends on: plan dimensions plus every
/// sensor's (id, x, y). Registry iteration is id-ordered, so the key is
/// stable across runs.
pub fn region_config_key(plan: &Floorplan, registry: &SensorRegistry) -> u32 {
    let mut bytes = Vec::with_capacity(8 + registry.len() * 12);
    bytes.extend_from_slice(&(plan.width() as u32).to_le_bytes());
    bytes.extend_from_slice(&(plan.height() as u32).to_le_bytes());
    for sensor in registry.iter() {
        bytes.extend_from_slice(&sensor.id.to_le_bytes());
        bytes.extend_from_slice(&(sensor.x as u32).to_le_bytes());
        bytes.extend_from_slice(&(sensor.y as u32).to_le_bytes());
    }
    xxh32(&bytes, CONFIG_KEY_SEED)
}

/// Encode a region map into cache bytes bound to `config_key`.
pub fn encode_region_cache(map: &RegionMap, config_key: u32) -> Vec<u8> {
    let cached = CachedRegions {
        schema_version: CACHE_SCHEMA_VERSION,
        width: map.width() as u32,
        height: map.height() as u32,
        owners: map.owners().to_vec(),
    };
    let encoded = bitcode::encode(&cached);
    let compressed = compress_prepend_size(&encoded);
    wrap_with_header(&compressed, config_key, encoded.len() as u32)
}

/// Decode cache bytes back into a region map.
///
/// Fails with [`SaveError::StaleConfig`] when the cache was built for a
/// different layout than `expected_key`, so callers fall back to
/// recomputing; structural damage and newer versions fail as themselves.
pub fn decode_region_cache(bytes: &[u8], expected_key: u32) -> Result<RegionMap, SaveError> {
    let (header, payload) = unwrap_header(bytes)?;
    if header.config_key != expected_key {
        return Err(SaveError::StaleConfig {
            expected: expected_key,
            found: header.config_key,
        });
    }

    let encoded =
        decompress_size_prepended(payload).map_err(|e| SaveError::Decode(e.to_string()))?;
    if encoded.len() != header.uncompressed_size as usize {
        return Err(SaveError::Corrupted(format!(
            "payload inflated to {} bytes, header promised {}",
            encoded.len(),
            header.uncompressed_size
        )));
    }

    let cached: CachedRegions = bitcode::decode(&encoded)?;
    if cached.schema_version > CACHE_SCHEMA_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: CACHE_SCHEMA_VERSION,
            found: cached.schema_version,
        });
    }

    RegionMap::from_owners(
        cached.width as usize,
        cached.height as usize,
        cached.owners,
    )
    .map_err(|e| SaveError::Corrupted(e.to_string()))
}

/// Write a region map cache file for the given layout.
pub fn store_region_cache(
    path: &Path,
    map: &RegionMap,
    plan: &Floorplan,
    registry: &SensorRegistry,
) -> Result<(), SaveError> {
    let key = region_config_key(plan, registry);
    std::fs::write(path, encode_region_cache(map, key))?;
    Ok(())
}

/// Load a region map cache for the given layout, if it is still valid.
pub fn load_region_cache(
    path: &Path,
    plan: &Floorplan,
    registry: &SensorRegistry,
) -> Result<RegionMap, SaveError> {
    let bytes = std::fs::read(path)?;
    decode_region_cache(&bytes, region_config_key(plan, registry))
}
