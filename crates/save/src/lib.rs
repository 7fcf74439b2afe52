//! Region-map cache persistence.
//!
//! Region growth is invariant across reading updates, so its result is worth
//! keeping between runs: a versioned, checksummed, lz4-compressed owner
//! array keyed by the floorplan dimensions and the sensor layout hash. A
//! cache that no longer matches the live layout loads as
//! [`SaveError::StaleConfig`] and the caller recomputes.

pub mod file_header;
pub mod region_cache;
pub mod save_error;

pub use region_cache::{
    decode_region_cache, encode_region_cache, load_region_cache, region_config_key,
    store_region_cache,
};
pub use save_error::SaveError;
