//! Thin wrapper over the `zstd` block compressor: a one-shot
//! `encode`/`decode` pair with a single `CodecError` failure mode, as the
//! spec's codec contract requires. The container's tile payloads are the
//! raw `zstd` frame; swapping the backing algorithm breaks format
//! compatibility.

use crate::error::{Error, Result};

/// Lowest accepted compression level.
pub const MIN_LEVEL: i32 = 1;
/// Highest accepted compression level.
pub const MAX_LEVEL: i32 = 19;

/// Clamp a caller-supplied level into `[MIN_LEVEL, MAX_LEVEL]`, per the
/// CLI's `-z` flag contract.
pub fn clamp_level(level: i32) -> i32 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Compress `src` in one shot at the given level.
pub fn encode(src: &[u8], level: i32) -> Result<Vec<u8>> {
    zstd::bulk::compress(src, level).map_err(|io_error| Error::codec(io_error.to_string()))
}

/// Decompress `src`, rejecting input whose natural output would exceed
/// `max_dst_size`. `zstd::bulk::decompress` returns a buffer sized to the
/// true decompressed length, not the capacity bound — this crate relies on
/// that returned length directly rather than the oversized-buffer-plus-NUL
/// convention the original tool used.
pub fn decode(src: &[u8], max_dst_size: usize) -> Result<Vec<u8>> {
    zstd::bulk::decompress(src, max_dst_size).map_err(|io_error| Error::codec(io_error.to_string()))
}
