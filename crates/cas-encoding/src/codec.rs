// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

//! Textual encodings for raw digest bytes.
//!
//! These work over any slice so that both full [`crate::Hash`]es
//! and [`crate::CompressedHash`]es share the same representations.

use data_encoding::{BASE64, HEXLOWER};

use crate::{Error, Result};

#[cfg(test)]
#[path = "./codec_test.rs"]
mod codec_test;

/// The symbols of the store's base-32 encoding, in value order.
///
/// This is not RFC 4648 base-32. The letters `e`, `o`, `t`
/// and `u` are omitted and the bit packing is reversed.
pub const NIX32_ALPHABET: &[u8; 32] = b"0123456789abcdfghijklmnpqrsvwxyz";

const INVALID_SYMBOL: u8 = 0xff;

const NIX32_VALUES: [u8; 256] = {
    let mut table = [INVALID_SYMBOL; 256];
    let mut i = 0;
    while i < NIX32_ALPHABET.len() {
        table[NIX32_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// The length of the base-16 encoding of `size` bytes
pub const fn base16_len(size: usize) -> usize {
    size * 2
}

/// The length of the nix32 encoding of `size` bytes
pub const fn base32_len(size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    (size * 8 - 1) / 5 + 1
}

/// The length of the padded base-64 encoding of `size` bytes
pub const fn base64_len(size: usize) -> usize {
    size.div_ceil(3) * 4
}

/// Encode bytes as lowercase hexadecimal.
pub fn encode_base16(bytes: &[u8]) -> String {
    HEXLOWER.encode(bytes)
}

/// Decode lowercase hexadecimal, rejecting any uppercase digits.
pub fn decode_base16(encoded: &str) -> Result<Vec<u8>> {
    HEXLOWER
        .decode(encoded.as_bytes())
        .map_err(|err| Error::bad_hash(format!("invalid base-16 hash '{encoded}': {err}")))
}

/// Encode bytes with the store's base-32 alphabet and bit packing.
///
/// Bit `i` of the input ends up at bit `i` of a little-endian
/// stream read starting from the last character.
pub fn encode_base32(bytes: &[u8]) -> String {
    let len = base32_len(bytes.len());
    let mut encoded = String::with_capacity(len);
    for n in (0..len).rev() {
        let b = n * 5;
        let i = b / 8;
        let j = b % 8;
        let low = u16::from(bytes[i]) >> j;
        let high = bytes
            .get(i + 1)
            .map_or(0, |&next| u16::from(next) << (8 - j));
        let symbol = NIX32_ALPHABET[usize::from((low | high) & 0x1f)];
        encoded.push(char::from(symbol));
    }
    encoded
}

/// Decode a nix32 string into exactly `size` bytes.
///
/// Any bits that would land beyond the final byte must be zero.
pub fn decode_base32(encoded: &str, size: usize) -> Result<Vec<u8>> {
    if encoded.len() != base32_len(size) {
        return Err(Error::bad_hash(format!(
            "invalid base-32 hash '{encoded}': expected {} characters",
            base32_len(size)
        )));
    }
    let mut decoded = vec![0u8; size];
    for (n, symbol) in encoded.bytes().rev().enumerate() {
        let digit = NIX32_VALUES[usize::from(symbol)];
        if digit == INVALID_SYMBOL {
            return Err(Error::bad_hash(format!(
                "invalid base-32 hash '{encoded}': unexpected character {:?}",
                char::from(symbol)
            )));
        }
        let digit = u16::from(digit);
        let b = n * 5;
        let i = b / 8;
        let j = b % 8;
        decoded[i] |= (digit << j) as u8;
        let carry = (digit >> (8 - j)) as u8;
        match decoded.get_mut(i + 1) {
            Some(next) => *next |= carry,
            None if carry != 0 => {
                return Err(Error::bad_hash(format!(
                    "invalid base-32 hash '{encoded}': trailing bits are not zero"
                )));
            }
            None => {}
        }
    }
    Ok(decoded)
}

/// Encode bytes as padded, standard-alphabet base-64.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode padded, standard-alphabet base-64.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(encoded.as_bytes())
        .map_err(|err| Error::bad_hash(format!("invalid base-64 hash '{encoded}': {err}")))
}
