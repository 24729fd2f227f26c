//! Hex and base32 codecs.
//!
//! Hex output is always uppercase. Hex input is case-insensitive and an
//! odd-length input is accepted: the dangling nibble becomes the high nibble
//! of one extra byte.
//!
//! The base32 codec uses the ledger's own 32-character alphabet (no `0`, `2`,
//! `l` or `v`), packs 5 bits per character most-significant-bit first, and
//! never pads.

use crate::error::{CoreError, Result};

/// The ledger's base32 alphabet.
pub const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Encode bytes as uppercase hex.
pub fn hex_encode(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode hex text of either case.
pub fn hex_decode(text: &str) -> Result<Vec<u8>> {
    if let Some(c) = text.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(CoreError::malformed(format!("invalid hex character {c:?}")));
    }

    let (pairs, tail) = text.split_at(text.len() & !1);
    let mut bytes = hex::decode(pairs)?;
    if !tail.is_empty() {
        let nibble = u8::from_str_radix(tail, 16)
            .map_err(|e| CoreError::malformed(e.to_string()))?;
        bytes.push(nibble << 4);
    }
    Ok(bytes)
}

/// Decode hex text into a fixed-size array. The length must match exactly.
pub fn hex_decode_array<const N: usize>(text: &str) -> Result<[u8; N]> {
    if text.len() != N * 2 {
        return Err(CoreError::malformed(format!(
            "expected {} hex characters, got {}",
            N * 2,
            text.len()
        )));
    }
    let bytes = hex_decode(text)?;
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

/// Encode bytes with the ledger base32 alphabet.
///
/// If the bit length is not a multiple of 5, the final character is
/// right-padded with zero bits.
pub fn base32_encode(data: &[u8]) -> String {
    let mut result = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in data {
        buffer = (buffer << 8) | (byte as u64);
        bits_in_buffer += 8;

        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let index = ((buffer >> bits_in_buffer) & 0x1f) as usize;
            result.push(BASE32_ALPHABET[index] as char);
        }
    }

    if bits_in_buffer > 0 {
        let index = ((buffer << (5 - bits_in_buffer)) & 0x1f) as usize;
        result.push(BASE32_ALPHABET[index] as char);
    }

    result
}

/// Decode ledger base32 text.
///
/// `text.len() * 5` must be a multiple of 8; anything else cannot be produced
/// by [`base32_encode`] on whole bytes and is rejected.
pub fn base32_decode(text: &str) -> Result<Vec<u8>> {
    if (text.len() * 5) % 8 != 0 {
        return Err(CoreError::malformed(format!(
            "base32 length {} does not encode whole bytes",
            text.len()
        )));
    }

    let mut out = Vec::with_capacity(text.len() * 5 / 8);
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for c in text.bytes() {
        let value = base32_value(c)
            .ok_or_else(|| CoreError::malformed(format!("invalid base32 character {:?}", c as char)))?;
        buffer = (buffer << 5) | value as u64;
        bits_in_buffer += 5;

        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            out.push((buffer >> bits_in_buffer) as u8);
        }
    }

    Ok(out)
}

fn base32_value(c: u8) -> Option<u8> {
    BASE32_ALPHABET.iter().position(|&a| a == c).map(|i| i as u8)
}
