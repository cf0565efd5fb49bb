//! Unsigned width conversion.
//!
//! Record fields are stored as unsigned 16- and 32-bit little-endian values.
//! Decoded records keep them in the next wider type so that the full unsigned
//! range survives arithmetic against signed sentinels downstream.

/// Decode a 2-byte little-endian unsigned value into `[0, 65535]`.
pub const fn u16_from_le(bytes: [u8; 2]) -> u32 {
    u16::from_le_bytes(bytes) as u32
}

/// Decode a 4-byte little-endian unsigned value into `[0, 4294967295]`.
pub const fn u32_from_le(bytes: [u8; 4]) -> u64 {
    u32::from_le_bytes(bytes) as u64
}
