//! Short commit identifiers.
//!
//! Ids are derived from a 32-bit rolling hash over the UTF-16 code units of
//! the input, truncated to seven lowercase hex digits. The function is
//! deterministic, so identical inputs always yield identical ids; callers are
//! responsible for salting the input when an id is already taken.

/// Compute the seven-hex-digit id of `input`
pub fn content_hash(input: &str) -> String {
    let hash = input.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    });
    format!("{:07x}", (hash as u32) & 0x0fff_ffff)
}
